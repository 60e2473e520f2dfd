use chrono::TimeZone;

use crate::api::{Comment, CommentId};

pub fn comment(id: i64, parent: Option<i64>) -> Comment {
    Comment {
        id: CommentId(id),
        content: format!("comment {id}"),
        created_at: chrono::Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap()
            + chrono::Duration::minutes(id),
        parent_id: parent.map(CommentId),
        children: Vec::new(),
    }
}

/// Build a forest out of arbitrary bytes: the i-th byte picks the parent of
/// comment i + 1 among the comments already built, or makes it a root.
pub fn forest_from_shape(shape: &[u8]) -> Vec<Comment> {
    let mut parents: Vec<Option<usize>> = Vec::with_capacity(shape.len());
    for (i, b) in shape.iter().enumerate() {
        let pick = *b as usize % (i + 1);
        parents.push((pick != i).then(|| pick));
    }

    fn build(parents: &[Option<usize>], of: Option<usize>) -> Vec<Comment> {
        parents
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == of)
            .map(|(i, p)| Comment {
                children: build(parents, Some(i)),
                ..comment(i as i64 + 1, p.map(|p| p as i64 + 1))
            })
            .collect()
    }
    build(&parents, None)
}
