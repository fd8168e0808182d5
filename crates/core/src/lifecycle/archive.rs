//! Archive listing and search.

use crate::conversation::Conversation;
use crate::types::DbId;

/// Records whose title or counterpart name contains `query`, ignoring case.
/// A blank query matches everything.
pub fn filter_conversations<'a>(conversations: &'a [Conversation], query: &str) -> Vec<&'a Conversation> {
    let query = query.trim();
    conversations
        .iter()
        .filter(|c| query.is_empty() || c.matches_query(query))
        .collect()
}

/// Read-only view over the store's listing.
#[derive(Debug, Clone, Default)]
pub struct ArchiveView {
    conversations: Vec<Conversation>,
    query: String,
}

impl ArchiveView {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn all(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn visible(&self) -> Vec<&Conversation> {
        filter_conversations(&self.conversations, &self.query)
    }

    pub fn find(&self, id: DbId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ConversationDraft;

    fn titled(title: &str, person: &str) -> Conversation {
        Conversation::from_draft(ConversationDraft {
            title: title.into(),
            person_name: person.into(),
            ..Default::default()
        })
    }

    #[test]
    fn search_matches_title_in_any_case() {
        let all = vec![
            titled("Grade Dispute", "Mr. Thompson"),
            titled("Cell Phone Use", "Ms. Davis"),
        ];
        for query in ["grade", "GRADE", "Grade"] {
            let hits = filter_conversations(&all, query);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].title, "Grade Dispute");
        }
    }

    #[test]
    fn search_matches_person_and_blank_matches_all() {
        let mut view = ArchiveView::new(vec![
            titled("Grade Dispute", "Mr. Thompson"),
            titled("Cell Phone Use", "Ms. Davis"),
        ]);
        assert_eq!(view.visible().len(), 2);

        view.set_query("davis");
        let hits = view.visible();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Cell Phone Use");
    }
}
