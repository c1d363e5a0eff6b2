//! Camera session bookkeeping.
//!
//! The browser answers camera requests asynchronously, so a grant can arrive
//! after the user stopped the camera or closed the modal. Every request gets a
//! ticket; only the ticket still pending when the answer arrives may attach.

#[derive(Debug)]
pub struct CameraSession<S> {
    stream: Option<S>,
    pending: Option<u64>,
    generation: u64,
}

impl<S> Default for CameraSession<S> {
    fn default() -> Self {
        Self {
            stream: None,
            pending: None,
            generation: 0,
        }
    }
}

impl<S> CameraSession<S> {
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Issues a ticket for a new request, or None when a stream is live or a request is in flight.
    pub fn begin_request(&mut self) -> Option<u64> {
        if self.stream.is_some() || self.pending.is_some() {
            return None;
        }
        self.generation += 1;
        self.pending = Some(self.generation);
        Some(self.generation)
    }

    /// Stores the granted stream. A stale ticket hands the stream back so the caller can stop it.
    pub fn attach(&mut self, ticket: u64, stream: S) -> Result<(), S> {
        if self.pending != Some(ticket) {
            return Err(stream);
        }
        self.pending = None;
        self.stream = Some(stream);
        Ok(())
    }

    /// Clears a failed request. False when the ticket was already invalidated,
    /// in which case the failure is no longer the user's concern.
    pub fn fail(&mut self, ticket: u64) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Takes the live stream and invalidates any request still in flight.
    pub fn release(&mut self) -> Option<S> {
        self.pending = None;
        self.stream.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut s: CameraSession<&str> = CameraSession::default();
        let t = s.begin_request().unwrap();
        assert!(s.begin_request().is_none());
        assert!(s.attach(t, "cam").is_ok());
        assert!(s.is_active());
        assert!(s.begin_request().is_none());
    }

    #[test]
    fn release_without_stream_is_noop() {
        let mut s: CameraSession<&str> = CameraSession::default();
        assert_eq!(s.release(), None);
        assert_eq!(s.release(), None);
        assert!(!s.is_active());
    }

    #[test]
    fn late_grant_after_release_is_rejected() {
        let mut s: CameraSession<&str> = CameraSession::default();
        let t = s.begin_request().unwrap();
        assert_eq!(s.release(), None);
        assert_eq!(s.attach(t, "late"), Err("late"));
        assert!(!s.is_active());
        let t2 = s.begin_request().unwrap();
        assert_ne!(t, t2);
        assert_eq!(s.attach(t, "older"), Err("older"));
        assert!(s.attach(t2, "fresh").is_ok());
        assert_eq!(s.release(), Some("fresh"));
    }

    #[test]
    fn denial_clears_pending() {
        let mut s: CameraSession<&str> = CameraSession::default();
        let t = s.begin_request().unwrap();
        assert!(s.fail(t));
        assert!(!s.is_pending());
        assert!(s.begin_request().is_some());
    }

    #[test]
    fn denial_after_release_is_stale() {
        let mut s: CameraSession<&str> = CameraSession::default();
        let t = s.begin_request().unwrap();
        assert_eq!(s.release(), None);
        assert!(!s.fail(t));
        let t2 = s.begin_request().unwrap();
        assert!(!s.fail(t));
        assert!(s.is_pending());
        assert!(s.fail(t2));
    }
}
