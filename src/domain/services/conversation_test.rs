use super::Conversation;
use crate::domain::models::Role;
use crate::domain::models::Turn;
use crate::domain::models::TurnContent;
use crate::domain::models::Variant;

#[test]
fn it_starts_empty() {
    let conversation = Conversation::default();
    assert!(conversation.is_empty());
    assert_eq!(conversation.len(), 0);
    assert!(conversation.last().is_none());
    assert!(conversation.all().is_empty());
}

#[test]
fn it_keeps_insertion_order() {
    let mut conversation = Conversation::default();
    conversation.append(Turn::user("First"));
    conversation.append(Turn::assistant(
        TurnContent::Text("Second".to_string()),
        Variant::Passthrough,
    ));
    conversation.append(Turn::user("First"));

    let roles = conversation
        .all()
        .iter()
        .map(|turn| {
            return turn.role();
        })
        .collect::<Vec<Role>>();

    assert_eq!(conversation.len(), 3);
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    assert_eq!(conversation.last(), Some(&Turn::user("First")));
}

#[test]
fn it_removes_the_last_turn() {
    let mut conversation = Conversation::default();
    conversation.append(Turn::user("First"));
    conversation.append(Turn::user("Second"));

    assert_eq!(conversation.remove_last(), Some(Turn::user("Second")));
    assert_eq!(conversation.all(), &[Turn::user("First")]);
}

#[test]
fn it_removes_nothing_when_empty() {
    let mut conversation = Conversation::default();
    assert_eq!(conversation.remove_last(), None);
    assert!(conversation.is_empty());
}

#[test]
fn it_clears() {
    let mut conversation = Conversation::default();
    conversation.append(Turn::user("First"));
    conversation.clear();
    assert!(conversation.is_empty());
}
