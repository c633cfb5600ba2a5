//! Tests for Note model

#[cfg(test)]
mod tests {
    use crate::models::{validate_forest, Block, BlockType, Note, ValidationError};
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn sample_tree() -> Note {
        let mut root = Note::new_with_id("root".to_string(), "Root".to_string());
        let mut child = Note::new_with_id("child".to_string(), "Child".to_string());
        child.add_child(Note::new_with_id("grandchild".to_string(), "Grandchild".to_string()));
        root.add_child(child);
        root.add_child(Note::new_with_id("sibling".to_string(), "Sibling".to_string()));
        root
    }

    #[test]
    fn test_new_note_defaults() {
        let note = Note::new("Fresh".to_string());

        assert!(!note.id.is_empty());
        assert_eq!(note.title, "Fresh");
        assert_eq!(note.content.len(), 1);
        assert_eq!(note.content[0].block_type, BlockType::Text);
        assert_eq!(note.content[0].content, "");
        assert_eq!(note.metadata.created, note.metadata.modified);
        assert_eq!(note.metadata.word_count, 0);
        assert_eq!(note.metadata.character_count, 0);
        assert!(note.metadata.tags.is_empty());
        assert!(note.children.is_none());
    }

    #[test]
    fn test_set_body_text_recomputes_counts() {
        let mut note = Note::new("Counts".to_string());
        note.set_body_text("  foo   bar ".to_string());

        assert_eq!(note.body_text(), "  foo   bar ");
        assert_eq!(note.metadata.word_count, 2);
        assert_eq!(note.metadata.character_count, 12);

        note.set_body_text(String::new());
        assert_eq!(note.metadata.word_count, 0);
        assert_eq!(note.metadata.character_count, 0);
    }

    #[test]
    fn test_set_body_text_creates_text_block_when_missing() {
        let mut note = Note::new("No text".to_string());
        note.content = vec![Block::new(BlockType::Heading1, "# Title".to_string())];

        note.set_body_text("body".to_string());

        assert_eq!(note.content.len(), 2);
        assert_eq!(note.body_text(), "body");
        assert_eq!(note.plain_text(), "# Title\nbody");
        assert_eq!(note.metadata.word_count, 3);
    }

    #[test]
    fn test_content_change_updates_modified_not_created() {
        let mut note = Note::new("Times".to_string());
        let created = note.metadata.created - Duration::hours(1);
        note.metadata.created = created;
        note.metadata.modified = created;

        note.set_body_text("edited".to_string());

        assert_eq!(note.metadata.created, created);
        assert!(note.metadata.modified > created);
    }

    #[test]
    fn test_block_operations() {
        let mut note = Note::new("Blocks".to_string());
        let id = note.push_block(BlockType::Code, "fn main() {}".to_string());

        assert_eq!(note.content.len(), 2);
        assert_eq!(note.metadata.word_count, 3);

        assert!(note.update_block(&id, "let x = 1;".to_string()));
        assert_eq!(note.content[1].content, "let x = 1;");
        assert!(!note.update_block("missing", "x".to_string()));

        let removed = note.remove_block(&id).unwrap();
        assert_eq!(removed.block_type, BlockType::Code);
        assert!(note.remove_block(&id).is_none());
        assert_eq!(note.metadata.word_count, 0);
    }

    #[test]
    fn test_add_tag_is_unique_and_ordered() {
        let mut note = Note::new("Tags".to_string());

        assert!(note.add_tag("welcome"));
        assert!(note.add_tag("getting-started"));
        assert!(!note.add_tag("welcome"));
        assert!(!note.add_tag("  welcome  "));
        assert!(note.add_tag("Welcome"));
        assert!(!note.add_tag("   "));
        assert!(note.add_tag(" pinned\t"));

        assert_eq!(
            note.metadata.tags,
            vec!["welcome", "getting-started", "Welcome", "pinned"]
        );
        assert_eq!(
            note.metadata.tag_list(),
            "welcome, getting-started, Welcome, pinned"
        );
        assert!(note.remove_tag("pinned"));
    }

    #[test]
    fn test_duplicate_tag_leaves_modified_untouched() {
        let mut note = Note::new("Tags".to_string());
        note.add_tag("a");
        let stamp = Utc::now() - Duration::days(1);
        note.metadata.modified = stamp;

        assert!(!note.add_tag("a"));
        assert!(!note.remove_tag("b"));
        assert_eq!(note.metadata.modified, stamp);
        assert_eq!(note.metadata.tags, vec!["a"]);
    }

    #[test]
    fn test_remove_tag() {
        let mut note = Note::new("Tags".to_string());
        note.add_tag("a");
        note.add_tag("b");

        assert!(note.remove_tag("a"));
        assert_eq!(note.metadata.tags, vec!["b"]);
        assert!(!note.remove_tag("a"));
    }

    #[test]
    fn test_favicon_and_cover() {
        let mut note = Note::new("Decor".to_string());
        note.set_favicon(Some("📝".to_string()));
        note.set_cover_image(Some("https://example.com/cover.png".to_string()));

        assert_eq!(note.metadata.favicon.as_deref(), Some("📝"));
        assert_eq!(
            note.metadata.cover_image.as_deref(),
            Some("https://example.com/cover.png")
        );

        note.set_favicon(None);
        assert!(note.metadata.favicon.is_none());
    }

    #[test]
    fn test_children_counts() {
        let root = sample_tree();
        assert_eq!(root.child_count(), 2);
        assert_eq!(root.descendant_count(), 3);
    }

    #[test]
    fn test_depth() {
        let mut leaf_parent = Note::new("mid".to_string());
        leaf_parent.add_child(Note::new("leaf".to_string()));
        let mut root = Note::new("root".to_string());
        root.add_child(Note::new("shallow".to_string()));
        root.add_child(leaf_parent);

        assert_eq!(Note::new("alone".to_string()).depth(), 1);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_validate_accepts_fresh_tree() {
        assert!(sample_tree().validate().is_ok());
        assert!(validate_forest(&[sample_tree()]).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let note = Note::new_with_id(String::new(), "Nameless".to_string());
        assert_eq!(
            note.validate(),
            Err(ValidationError::MissingField("id".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_block_ids() {
        let mut note = Note::new_with_id("n1".to_string(), "Dup".to_string());
        let block = note.content[0].clone();
        note.content.push(block.clone());

        assert_eq!(
            note.validate(),
            Err(ValidationError::DuplicateBlockId {
                note_id: "n1".to_string(),
                block_id: block.id,
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_tags_in_stored_data() {
        let mut note = Note::new_with_id("n1".to_string(), "Dup".to_string());
        note.metadata.tags = vec!["x".to_string(), "x".to_string()];

        assert!(matches!(
            note.validate(),
            Err(ValidationError::DuplicateTag { .. })
        ));
    }

    #[test]
    fn test_validate_checks_nested_children() {
        let mut root = sample_tree();
        root.children.as_mut().unwrap()[0].metadata.tags = vec![String::new()];

        assert_eq!(
            root.validate(),
            Err(ValidationError::EmptyTag("child".to_string()))
        );
    }

    #[test]
    fn test_validate_forest_rejects_duplicate_note_ids() {
        let mut second = Note::new_with_id("other".to_string(), "Other".to_string());
        second.add_child(Note::new_with_id("grandchild".to_string(), "Clash".to_string()));

        assert_eq!(
            validate_forest(&[sample_tree(), second]),
            Err(ValidationError::DuplicateNoteId("grandchild".to_string()))
        );
    }

    #[test]
    fn test_note_wire_format_field_names() {
        let mut note = Note::new_with_id("n1".to_string(), "Wire".to_string());
        note.set_body_text("hello".to_string());
        note.add_tag("t");

        let value = serde_json::to_value(&note).unwrap();

        assert_eq!(value["id"], "n1");
        assert_eq!(value["title"], "Wire");
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["metadata"]["wordCount"], 1);
        assert_eq!(value["metadata"]["characterCount"], 5);
        assert_eq!(value["metadata"]["tags"], json!(["t"]));
        assert!(value["metadata"]["created"].is_string());
        assert!(value["metadata"].get("coverImage").is_none());
        assert!(value.get("children").is_none());
    }

    #[test]
    fn test_note_json_round_trip() {
        let mut root = sample_tree();
        root.set_body_text("Root body".to_string());
        root.set_cover_image(Some("cover.png".to_string()));
        root.children.as_mut().unwrap()[1].children = Some(Vec::new());

        let text = serde_json::to_string(&root).unwrap();
        let back: Note = serde_json::from_str(&text).unwrap();

        assert_eq!(back, root);
    }

    #[test]
    fn test_deserialize_rejects_missing_metadata() {
        let raw = json!({"id": "n1", "title": "t", "content": []});
        assert!(serde_json::from_value::<Note>(raw).is_err());
    }
}
