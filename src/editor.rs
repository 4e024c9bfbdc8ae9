//! Edit session over one descriptor's params, headers and body
//!
//! Edits happen on a draft. Saving keeps the draft in memory, cancelling
//! throws it away. Nothing here is ever written to disk.

use crate::models::{EditableRequest, EndpointDescriptor, Header};

#[derive(Clone, Debug, Default)]
pub struct EditSession {
    committed: EditableRequest,
    draft: Option<EditableRequest>,
}

impl EditSession {
    /// Fresh, read-only session seeded from `descriptor`
    pub fn new(descriptor: &EndpointDescriptor) -> Self {
        EditSession {
            committed: EditableRequest::from_descriptor(descriptor),
            draft: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// What the user currently sees: the draft while editing
    pub fn current(&self) -> &EditableRequest {
        self.draft.as_ref().unwrap_or(&self.committed)
    }

    /// Mutable access, only while in edit mode
    pub fn draft_mut(&mut self) -> Option<&mut EditableRequest> {
        self.draft.as_mut()
    }

    pub fn begin(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.committed.clone());
        }
    }

    pub fn save(&mut self) {
        if let Some(draft) = self.draft.take() {
            self.committed = draft;
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Text of one field of the draft
    pub fn field_mut(&mut self, field: EditField) -> Option<&mut String> {
        let draft = self.draft.as_mut()?;
        match field {
            EditField::ParamValue(i) => draft.params.get_mut(i).map(|p| &mut p.value),
            EditField::HeaderKey(i) => draft.headers.get_mut(i).map(|h| &mut h.key),
            EditField::HeaderValue(i) => draft.headers.get_mut(i).map(|h| &mut h.value),
            EditField::Body => Some(&mut draft.body),
        }
    }

    pub fn field(&self, field: EditField) -> Option<&str> {
        let current = self.current();
        match field {
            EditField::ParamValue(i) => current.params.get(i).map(|p| p.value.as_str()),
            EditField::HeaderKey(i) => current.headers.get(i).map(|h| h.key.as_str()),
            EditField::HeaderValue(i) => current.headers.get(i).map(|h| h.value.as_str()),
            EditField::Body => Some(current.body.as_str()),
        }
    }

    /// Append a header to the draft, returning its index
    pub fn add_header(&mut self) -> Option<usize> {
        let draft = self.draft.as_mut()?;
        draft.headers.push(Header::new("X-Custom", "value"));
        Some(draft.headers.len() - 1)
    }

    pub fn delete_header(&mut self, index: usize) -> bool {
        match self.draft.as_mut() {
            Some(draft) if index < draft.headers.len() => {
                draft.headers.remove(index);
                true
            }
            _ => false,
        }
    }
}

/// A single editable text field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    ParamValue(usize),
    HeaderKey(usize),
    HeaderValue(usize),
    Body,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthInfo, HttpMethod, Param, ParamLocation};

    fn descriptor(slug: &str, value: &str) -> EndpointDescriptor {
        EndpointDescriptor {
            slug: slug.to_string(),
            name: String::new(),
            description: String::new(),
            method: HttpMethod::POST,
            url: "/x/{id}".to_string(),
            params: vec![Param::new("id", value, ParamLocation::Path)],
            headers: vec![Header::new("Content-Type", "application/json")],
            body: Some("{}".to_string()),
            request_schema: Vec::new(),
            auth: AuthInfo::default(),
        }
    }

    #[test]
    fn test_read_only_until_begin() {
        let mut session = EditSession::new(&descriptor("a", "1"));
        assert!(!session.is_editing());
        assert!(session.field_mut(EditField::Body).is_none());
        assert!(session.add_header().is_none());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut session = EditSession::new(&descriptor("a", "1"));
        session.begin();
        session.field_mut(EditField::ParamValue(0)).unwrap().push('9');
        assert_eq!(session.field(EditField::ParamValue(0)), Some("19"));

        session.cancel();
        assert_eq!(session.current().params[0].value, "1");
    }

    #[test]
    fn test_save_keeps_draft() {
        let mut session = EditSession::new(&descriptor("a", "1"));
        session.begin();
        *session.field_mut(EditField::Body).unwrap() = r#"{"x":true}"#.to_string();
        let idx = session.add_header().unwrap();
        session.save();

        assert!(!session.is_editing());
        assert_eq!(session.current().body, r#"{"x":true}"#);
        assert_eq!(session.current().headers[idx].key, "X-Custom");
    }

    #[test]
    fn test_new_session_shares_nothing_with_previous() {
        let first = descriptor("a", "1");
        let second = descriptor("b", "2");

        let mut old = EditSession::new(&first);
        let new = EditSession::new(&second);
        old.begin();
        old.field_mut(EditField::ParamValue(0)).unwrap().push_str("00");
        old.delete_header(0);
        old.save();

        assert_eq!(new.current().params[0].value, "2");
        assert_eq!(new.current().headers.len(), 1);
        assert_eq!(second.params[0].value, "2");
    }
}
