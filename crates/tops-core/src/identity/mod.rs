//! Petname assignment keyed on deployment-id continuity.

use petname::{Generator, Petnames};
use rand::Rng;
use tops_model::StateDocument;
use tracing::{debug, info};

/// Source of fresh human-readable names.
pub trait NameGenerator: Send + Sync {
    fn generate(&self) -> String;
}

const FALLBACK_NAME: &str = "lab";

/// Random `adjective-noun` names (or `adverb-adjective-noun` for three words)
/// drawn from the `petname` word lists.
#[derive(Debug, Clone)]
pub struct PetnameGenerator {
    words: u8,
    separator: String,
}

impl PetnameGenerator {
    pub fn new(words: u8, separator: impl Into<String>) -> Self {
        Self {
            words: words.max(1),
            separator: separator.into(),
        }
    }

    fn generate_with<R: Rng>(&self, rng: &mut R) -> String {
        // the bundled word lists are never empty
        Petnames::default()
            .generate(rng, self.words, &self.separator)
            .unwrap_or_else(|| FALLBACK_NAME.to_string())
    }
}

impl Default for PetnameGenerator {
    fn default() -> Self {
        Self::new(2, "-")
    }
}

impl NameGenerator for PetnameGenerator {
    fn generate(&self) -> String {
        self.generate_with(&mut rand::thread_rng())
    }
}

/// Outcome of [`IdentityAssigner::assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub petname: String,
    /// `true` when a new name was minted and the state must be persisted.
    pub changed: bool,
}

/// The only place a petname is minted.
pub struct IdentityAssigner<G = PetnameGenerator> {
    generator: G,
}

impl<G: NameGenerator> IdentityAssigner<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Reuse the previous petname when the deployment id is unchanged,
    /// otherwise mint a new one.
    pub fn assign(&self, dep_id: &str, previous: Option<&StateDocument>) -> Assignment {
        let kept = previous
            .filter(|doc| doc.dep_id() == Some(dep_id))
            .and_then(StateDocument::petname);

        match kept {
            Some(petname) => {
                debug!(dep_id, petname, "keeping petname for unchanged deployment");
                Assignment {
                    petname: petname.to_string(),
                    changed: false,
                }
            }
            None => {
                let petname = self.generator.generate();
                info!(
                    dep_id,
                    previous = previous.and_then(StateDocument::dep_id).unwrap_or("none"),
                    petname = %petname,
                    "assigned new petname"
                );
                Assignment {
                    petname,
                    changed: true,
                }
            }
        }
    }
}

impl Default for IdentityAssigner<PetnameGenerator> {
    fn default() -> Self {
        Self::new(PetnameGenerator::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct Counting(AtomicU32);

    impl NameGenerator for Counting {
        fn generate(&self) -> String {
            format!("name-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn doc(dep_id: &str, petname: &str) -> StateDocument {
        serde_json::from_value(json!({
            "metadata": {"depID": dep_id, "petname": petname},
            "labinfo": {"sqsURL": "https://queue/r1/q"},
        }))
        .unwrap()
    }

    #[test]
    fn fresh_environment_mints_a_name() {
        let assigner = IdentityAssigner::new(Counting::default());
        let a = assigner.assign("d1", None);
        assert_eq!(
            a,
            Assignment {
                petname: "name-0".into(),
                changed: true
            }
        );
    }

    #[test]
    fn same_dep_id_keeps_name() {
        let assigner = IdentityAssigner::new(Counting::default());
        let first = assigner.assign("d1", None);
        let persisted = doc("d1", &first.petname);

        let second = assigner.assign("d1", Some(&persisted));
        let third = assigner.assign("d1", Some(&persisted));

        assert_eq!(second.petname, first.petname);
        assert!(!second.changed);
        assert_eq!(second, third);
    }

    #[test]
    fn new_dep_id_mints_fresh_name() {
        let assigner = IdentityAssigner::new(Counting::default());
        let stale = doc("d1", "otter");

        let a = assigner.assign("d2", Some(&stale));

        assert_ne!(a.petname, "otter");
        assert!(a.changed);
    }

    #[test]
    fn previous_without_petname_mints() {
        let assigner = IdentityAssigner::new(Counting::default());
        let broken: StateDocument =
            serde_json::from_value(json!({"metadata": {"depID": "d1"}})).unwrap();

        assert!(assigner.assign("d1", Some(&broken)).changed);
    }

    fn is_word(part: &str) -> bool {
        !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase())
    }

    #[test]
    fn petname_shapes() {
        let mut rng = StdRng::seed_from_u64(7);

        let two = PetnameGenerator::default().generate_with(&mut rng);
        let parts: Vec<_> = two.split('-').collect();
        assert_eq!(parts.len(), 2, "{two}");
        assert!(parts.iter().all(|p| is_word(p)), "{two}");

        let three = PetnameGenerator::new(3, "_").generate_with(&mut rng);
        assert_eq!(three.split('_').count(), 3, "{three}");

        let one = PetnameGenerator::new(0, "-").generate_with(&mut rng);
        assert!(is_word(&one), "{one}");
    }

    #[test]
    fn same_seed_same_name() {
        let generator = PetnameGenerator::default();
        let a = generator.generate_with(&mut StdRng::seed_from_u64(42));
        let b = generator.generate_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_ne!(a, FALLBACK_NAME);
    }
}
