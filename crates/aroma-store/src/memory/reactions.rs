use aroma_shared::Reaction;
use dashmap::DashMap;

use crate::assertions;
use crate::codec::canonical_id;
use crate::error::Result;
use crate::reactions::ReactionRepository;

#[derive(Default)]
pub struct MemoryReactionRepository {
    reactions: DashMap<String, Vec<Reaction>>,
}

impl MemoryReactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn save(&self, owner_id: &str, reactions: &[Reaction]) {
        let owner_id = canonical_id(owner_id);
        if reactions.is_empty() {
            self.reactions.remove(&owner_id);
        } else {
            self.reactions.insert(owner_id, reactions.to_vec());
        }
    }

    fn get(&self, owner_id: &str) -> Vec<Reaction> {
        self.reactions
            .get(&canonical_id(owner_id))
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

impl ReactionRepository for MemoryReactionRepository {
    fn save_reactions_for_user(&self, user_id: &str, reactions: &[Reaction]) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        self.save(user_id, reactions);
        Ok(())
    }

    fn get_reactions_for_user(&self, user_id: &str) -> Result<Vec<Reaction>> {
        assertions::valid_user_id(user_id)?;
        Ok(self.get(user_id))
    }

    fn delete_reactions_for_user(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        self.reactions.remove(&canonical_id(user_id));
        Ok(())
    }

    fn save_reactions_for_application(&self, app_id: &str, reactions: &[Reaction]) -> Result<()> {
        assertions::valid_app_id(app_id)?;
        self.save(app_id, reactions);
        Ok(())
    }

    fn get_reactions_for_application(&self, app_id: &str) -> Result<Vec<Reaction>> {
        assertions::valid_app_id(app_id)?;
        Ok(self.get(app_id))
    }

    fn delete_reactions_for_application(&self, app_id: &str) -> Result<()> {
        assertions::valid_app_id(app_id)?;
        self.reactions.remove(&canonical_id(app_id));
        Ok(())
    }
}
