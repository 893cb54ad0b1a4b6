//! Tag resolution: find-or-create by (key, value).

use domains::errors::Result;
use domains::models::Tag;
use domains::ports::TagRepository;

use crate::commands::TagSpec;

/// Returns the stored tag for `spec`, or a new unpersisted one.
///
/// The new tag is written by the board repository in the same transaction
/// as the board change that links it. A concurrent insert of the same pair
/// is rejected by the store's `(key, value)` unique constraint and surfaces
/// as `Conflict`.
pub async fn resolve_tag(tags: &dyn TagRepository, spec: &TagSpec) -> Result<Tag> {
    match tags.find_by_key_and_value(&spec.key, &spec.value).await? {
        Some(tag) => Ok(tag),
        None => {
            tracing::debug!(key = %spec.key, value = %spec.value, "creating new tag");
            Ok(spec.to_tag())
        }
    }
}

/// Resolves a request's tag specs, collapsing duplicate pairs first.
pub async fn resolve_tags(tags: &dyn TagRepository, specs: &[TagSpec]) -> Result<Vec<Tag>> {
    let mut resolved: Vec<Tag> = Vec::with_capacity(specs.len());
    for spec in specs {
        if resolved.iter().any(|t| t.matches(&spec.key, &spec.value)) {
            continue;
        }
        resolved.push(resolve_tag(tags, spec).await?);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ports::MockTagRepository;

    #[tokio::test]
    async fn existing_tag_is_reused() {
        let stored = Tag::new("cat", "free");
        let expected = stored.clone();
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_key_and_value()
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let tag = resolve_tag(&repo, &TagSpec::new("cat", "free")).await.unwrap();

        assert_eq!(tag, expected);
    }

    #[tokio::test]
    async fn missing_tag_is_built_fresh() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_key_and_value()
            .returning(|_, _| Ok(None));

        let tag = resolve_tag(&repo, &TagSpec::new("color", "red")).await.unwrap();

        assert_eq!(tag.key(), "color");
        assert_eq!(tag.value(), "red");
    }

    #[tokio::test]
    async fn duplicate_specs_resolve_once() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_key_and_value()
            .times(2)
            .returning(|_, _| Ok(None));

        let specs = [
            TagSpec::new("cat", "free"),
            TagSpec::new("cat", "free"),
            TagSpec::new("type", "IT"),
        ];
        let tags = resolve_tags(&repo, &specs).await.unwrap();

        assert_eq!(tags.len(), 2);
    }
}
