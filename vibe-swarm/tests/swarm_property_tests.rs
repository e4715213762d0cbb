//! Property tests for submission gating and event folding.

use proptest::prelude::*;
use vibe_core::{AgentStatus, Message};
use vibe_swarm::{SwarmEvent, SwarmState};
use vibe_test_utils::generators::{arb_agent_role, arb_blank_input, arb_prompt};

fn arb_status() -> impl Strategy<Value = AgentStatus> {
    prop::sample::select(vec![
        AgentStatus::Idle,
        AgentStatus::Thinking,
        AgentStatus::Working,
        AgentStatus::Waiting,
        AgentStatus::Completed,
        AgentStatus::Error,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: blank input never adds a message or changes an agent
    #[test]
    fn prop_blank_input_is_a_no_op(input in arb_blank_input()) {
        let mut state = SwarmState::default();
        let before = state.clone();
        prop_assert!(!state.begin_submission(&input));
        prop_assert_eq!(state, before);
    }

    /// Property: one accepted submission, then every further one is ignored
    #[test]
    fn prop_only_one_submission_in_flight(first in arb_prompt(), rest in prop::collection::vec(arb_prompt(), 1..5)) {
        let mut state = SwarmState::default();
        prop_assert!(state.begin_submission(&first));
        let accepted = state.clone();
        for input in rest {
            prop_assert!(!state.begin_submission(&input));
        }
        prop_assert_eq!(state, accepted);
    }

    /// Property: agent updates touch only agents with that role
    #[test]
    fn prop_agent_update_is_role_scoped(role in arb_agent_role(), status in arb_status(), task in proptest::option::of("[a-z .]{1,20}")) {
        let mut state = SwarmState::default();
        let before = state.agents.clone();
        state.apply(SwarmEvent::AgentUpdated { role, status, task: task.clone() });
        for (agent, old) in state.agents.iter().zip(before.iter()) {
            if agent.role == role {
                prop_assert_eq!(agent.status, status);
                prop_assert_eq!(&agent.current_task, &task);
            } else {
                prop_assert_eq!(agent, old);
            }
        }
    }

    /// Property: appended messages keep channel order
    #[test]
    fn prop_messages_keep_order(contents in prop::collection::vec("[a-z]{1,10}", 0..10)) {
        let mut state = SwarmState::default();
        for content in &contents {
            state.apply(SwarmEvent::MessageAppended { message: Message::system(content.clone()) });
        }
        let seen: Vec<_> = state.messages.iter().map(|m| m.content.clone()).collect();
        prop_assert_eq!(seen, contents);
    }
}
