use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DownloadLinkProps {
    /// Data URL of the last capture; the link is hidden while None.
    pub href: Option<String>,
    pub file_name: String,
}

#[function_component]
pub fn DownloadLink(props: &DownloadLinkProps) -> Html {
    let (href, display) = match &props.href {
        Some(url) => (url.clone(), "inline-block"),
        None => (String::new(), "none"),
    };
    html! {
        <a id="tryonDownload" href={href} download={props.file_name.clone()}
            style={format!("display:{}; margin-top:8px; color:#58a6ff;", display)}>
            {"Download snapshot"}
        </a>
    }
}
