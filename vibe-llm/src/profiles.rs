//! Role → model and system instruction mapping.

use serde::{Deserialize, Serialize};
use vibe_core::AgentRole;

pub const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REASONING_MODEL: &str = "gemini-3-pro-preview";

const COORDINATOR_INSTRUCTION: &str = "You are a helpful Project Manager agent.";
const ARCHITECT_INSTRUCTION: &str = "You are a Senior Software Architect. Analyze the requirements and propose a scalable, robust tech stack and file structure. Output pure JSON or Markdown.";
const INTEGRATOR_INSTRUCTION: &str = "You are an Integration Specialist using Context 7 MCP. Your job is to verify library versions and integration patterns. Check docs.";
const CODER_INSTRUCTION: &str = "You are a Senior React Developer. Write clean, performant, modern code. TypeScript only. Tailwind CSS only.";

/// Which configured model a role should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelTier {
    Fast,
    /// The "smarter" model, used for architecture planning
    Reasoning,
}

/// Model and instruction for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    pub tier: ModelTier,
    pub system_instruction: &'static str,
}

impl RoleProfile {
    pub fn for_role(role: AgentRole) -> Self {
        match role {
            AgentRole::Architect => Self {
                tier: ModelTier::Reasoning,
                system_instruction: ARCHITECT_INSTRUCTION,
            },
            AgentRole::Integrator => Self {
                tier: ModelTier::Fast,
                system_instruction: INTEGRATOR_INSTRUCTION,
            },
            AgentRole::Coder => Self {
                tier: ModelTier::Fast,
                system_instruction: CODER_INSTRUCTION,
            },
            AgentRole::Coordinator | AgentRole::QualityChecker => Self {
                tier: ModelTier::Fast,
                system_instruction: COORDINATOR_INSTRUCTION,
            },
        }
    }
}

/// Concrete model names behind each tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ModelSelection {
    pub fast: String,
    pub reasoning: String,
}

impl ModelSelection {
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast,
            ModelTier::Reasoning => &self.reasoning,
        }
    }
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST_MODEL.to_string(),
            reasoning: DEFAULT_REASONING_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architect_uses_reasoning_model() {
        let models = ModelSelection::default();
        let profile = RoleProfile::for_role(AgentRole::Architect);
        assert_eq!(models.model_for(profile.tier), DEFAULT_REASONING_MODEL);
        assert!(profile.system_instruction.contains("Software Architect"));
    }

    #[test]
    fn test_other_roles_use_fast_model() {
        let models = ModelSelection::default();
        for role in [
            AgentRole::Coordinator,
            AgentRole::Integrator,
            AgentRole::Coder,
            AgentRole::QualityChecker,
        ] {
            let profile = RoleProfile::for_role(role);
            assert_eq!(models.model_for(profile.tier), DEFAULT_FAST_MODEL);
        }
    }

    #[test]
    fn test_quality_checker_falls_back_to_coordinator_instruction() {
        assert_eq!(
            RoleProfile::for_role(AgentRole::QualityChecker),
            RoleProfile::for_role(AgentRole::Coordinator)
        );
    }
}
