use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use ratatui::{backend::TestBackend, Terminal};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use vibe_core::{FileNode, ViewMode, GENERATED_PROJECT_NAME};
use vibe_swarm::{Swarm, SwarmEvent, SwarmSettings};
use vibe_test_utils::generators::{arb_code_line, arb_file_tree};
use vibe_test_utils::{OfflineKnowledge, ScriptedGenerator};
use vibe_tui::config::{ConfigError, VibeConfig};
use vibe_tui::keys::{map_key, Action, Focus};
use vibe_tui::notifications::NotificationLevel;
use vibe_tui::state::App;
use vibe_tui::views::render_view;
use vibe_tui::widgets::{colorize_line, flatten};

fn new_app() -> (App, mpsc::Receiver<SwarmEvent>) {
    let (swarm, rx) = Swarm::new(
        Arc::new(ScriptedGenerator::new()),
        Arc::new(OfflineKnowledge),
        SwarmSettings::default(),
    );
    (App::new(VibeConfig::default(), swarm), rx)
}

/// Let background tasks run for `ms` of (paused) time, then fold their events.
async fn pump(app: &mut App, rx: &mut mpsc::Receiver<SwarmEvent>, ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    while let Ok(event) = rx.try_recv() {
        app.apply_swarm_event(event);
    }
}

fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| render_view(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_action(Action::Edit(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)));
    }
}

fn latest(app: &App) -> (NotificationLevel, String) {
    let note = app.notifications.last().unwrap();
    (note.level, note.message.clone())
}

fn collect_ids(nodes: &[FileNode], out: &mut Vec<String>) {
    for node in nodes {
        out.push(node.id.clone());
        collect_ids(node.children(), out);
    }
}

fn descendant_ids(node: &FileNode) -> HashSet<String> {
    let mut ids = Vec::new();
    collect_ids(node.children(), &mut ids);
    ids.into_iter().collect()
}

fn find<'a>(nodes: &'a [FileNode], id: &str) -> Option<&'a FileNode> {
    nodes.iter().find_map(|node| node.find(id))
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn default_config_is_valid() {
    assert!(VibeConfig::default().validate().is_ok());
}

#[test]
fn partial_config_keeps_defaults() {
    let config = VibeConfig::from_toml(
        r#"
log_path = "/tmp/vibe.log"

[pipeline]
scaffold_delay_ms = 10

[generation.models]
fast = "gemini-2.5-flash"
"#,
    )
    .unwrap();
    assert_eq!(config.pipeline.scaffold_delay_ms, 10);
    assert_eq!(config.pipeline.view_switch_delay_ms, 1000);
    assert_eq!(config.generation.models.fast, "gemini-2.5-flash");
    assert_eq!(config.hosting.repository_name, "vibe-app");
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert!(config.validate().is_ok());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = VibeConfig::from_toml("[ui]\nrefresh = 3\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let zero_tick = VibeConfig::from_toml("[ui]\ntick_rate_ms = 0\n").unwrap();
    assert!(matches!(
        zero_tick.validate(),
        Err(ConfigError::InvalidValue { field: "ui.tick_rate_ms", .. })
    ));

    let theme = VibeConfig::from_toml("[ui]\ntheme = \"solarized\"\n").unwrap();
    assert!(matches!(
        theme.validate(),
        Err(ConfigError::InvalidValue { field: "ui.theme", .. })
    ));

    let timeout = VibeConfig::from_toml("[generation]\nrequest_timeout_ms = 0\n").unwrap();
    assert!(matches!(
        timeout.validate(),
        Err(ConfigError::InvalidValue { field: "generation.request_timeout_ms", .. })
    ));

    let model = VibeConfig::from_toml("[generation.models]\nreasoning = \" \"\n").unwrap();
    assert!(matches!(
        model.validate(),
        Err(ConfigError::InvalidValue { field: "generation.models.reasoning", .. })
    ));
}

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[hosting]\nowner = \"octo\"\npush_delay_ms = 5").unwrap();
    let config = VibeConfig::from_path(file.path()).unwrap();
    assert_eq!(config.hosting.owner, "octo");
    assert_eq!(config.hosting.repository_url(), "https://github.com/octo/vibe-app");

    let missing = VibeConfig::from_path(&file.path().with_extension("missing"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}

#[test]
fn default_config_survives_toml_round_trip() {
    let config = VibeConfig::default();
    let text = toml::to_string(&config).unwrap();
    assert_eq!(VibeConfig::from_toml(&text).unwrap(), config);
}

// ============================================================================
// KEYS
// ============================================================================

proptest! {
    #[test]
    fn plain_chars_are_text_while_typing(ch in proptest::char::range('!', '~')) {
        let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
        prop_assert_eq!(map_key(key, Focus::Input, false), Some(Action::Edit(key)));
    }

    #[test]
    fn quit_works_everywhere(modal in any::<bool>(), tree in any::<bool>()) {
        let focus = if tree { Focus::Tree } else { Focus::Input };
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        prop_assert_eq!(map_key(key, focus, modal), Some(Action::Quit));
    }
}

// ============================================================================
// COLORIZER AND TREE
// ============================================================================

proptest! {
    #[test]
    fn colorized_segments_concatenate_to_line(line in arb_code_line()) {
        let text: String = colorize_line(&line).iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(text, line);
    }

    #[test]
    fn colorized_segments_are_never_empty(line in arb_code_line()) {
        prop_assert!(colorize_line(&line).iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn collapsing_hides_exactly_descendants(files in arb_file_tree(), pick in any::<prop::sample::Index>()) {
        let expanded = flatten(&files, &HashSet::new());
        let mut all_ids = Vec::new();
        collect_ids(&files, &mut all_ids);
        prop_assert_eq!(expanded.len(), all_ids.len());

        let dirs: Vec<&str> = expanded
            .iter()
            .filter(|item| item.is_directory)
            .map(|item| item.id.as_str())
            .collect();
        if dirs.is_empty() {
            return Ok(());
        }
        let dir = dirs[pick.index(dirs.len())];
        let hidden = find(&files, dir).map(descendant_ids).unwrap_or_default();

        let collapsed: HashSet<String> = [dir.to_string()].into_iter().collect();
        let visible: HashSet<String> =
            flatten(&files, &collapsed).into_iter().map(|item| item.id).collect();
        let expected: HashSet<String> = all_ids
            .into_iter()
            .filter(|id| !hidden.contains(id))
            .collect();
        prop_assert_eq!(visible, expected);
    }

    #[test]
    fn rows_descend_one_level_at_a_time(files in arb_file_tree()) {
        let rows = flatten(&files, &HashSet::new());
        prop_assert_eq!(rows.first().map(|row| row.depth), Some(0));
        for pair in rows.windows(2) {
            prop_assert!(pair[1].depth <= pair[0].depth + 1);
            if pair[1].depth == pair[0].depth + 1 {
                prop_assert!(pair[0].is_directory);
            }
        }
    }
}

// ============================================================================
// APP FLOW AND RENDERING
// ============================================================================

#[test]
fn empty_chat_renders_invitation() {
    let (app, _rx) = new_app();
    let screen = draw(&app);
    assert!(screen.contains("VibeCoder"));
    assert!(screen.contains("Architect Your Dream"));
    assert!(screen.contains("Enter to Send"));
    assert!(screen.contains("Context 7 Enabled"));
}

#[test]
fn toggle_refused_with_single_file() {
    let (mut app, _rx) = new_app();
    app.handle_action(Action::ToggleView);
    assert_eq!(app.state().view_mode, ViewMode::Chat);
    let (level, message) = latest(&app);
    assert_eq!(level, NotificationLevel::Warning);
    assert!(message.contains("view_mode"));
}

#[test]
fn code_view_without_files_shows_hint() {
    let (mut app, _rx) = new_app();
    app.apply_swarm_event(SwarmEvent::ProjectGenerated {
        name: "empty".to_string(),
        files: Vec::new(),
    });
    app.apply_swarm_event(SwarmEvent::ViewModeChanged { mode: ViewMode::Code });
    assert!(app.active_file_node().is_none());
    assert!(draw(&app).contains("Select a file to view code"));
}

#[tokio::test(start_paused = true)]
async fn submission_runs_pipeline_into_code_view() {
    let (mut app, mut rx) = new_app();
    type_text(&mut app, "todo app");
    assert_eq!(app.input_text(), "todo app");
    app.handle_action(Action::Submit);
    assert!(app.state().processing);
    assert_eq!(app.input_text(), "");

    pump(&mut app, &mut rx, 100).await;
    assert!(draw(&app).contains("Swarm is active..."));
    type_text(&mut app, "ignored");
    assert_eq!(app.input_text(), "");

    pump(&mut app, &mut rx, 5_000).await;
    assert!(!app.state().processing);
    assert_eq!(app.state().view_mode, ViewMode::Code);
    assert_eq!(app.state().project.name, GENERATED_PROJECT_NAME);
    assert_eq!(app.state().project.file_count(), 3);
    assert_eq!(app.active_file_node().map(|f| f.name.as_str()), Some("Header.tsx"));

    let screen = draw(&app);
    assert!(screen.contains("Header.tsx"));
    assert!(screen.contains("Preview"));
    assert!(screen.contains("GENERATED-VIBE-APP"));
}

#[tokio::test(start_paused = true)]
async fn tree_selection_changes_active_file() {
    let (mut app, mut rx) = new_app();
    type_text(&mut app, "landing page");
    app.handle_action(Action::Submit);
    pump(&mut app, &mut rx, 5_000).await;

    app.handle_action(Action::SwitchFocus);
    assert_eq!(app.focus, Focus::Tree);
    // src, components, Header.tsx, Hero.tsx, App.tsx
    for _ in 0..4 {
        app.handle_action(Action::MoveDown);
    }
    app.handle_action(Action::Activate);
    assert_eq!(app.active_file_node().map(|f| f.name.as_str()), Some("App.tsx"));

    app.handle_action(Action::ToggleView);
    assert_eq!(app.state().view_mode, ViewMode::Chat);
    assert_eq!(app.focus, Focus::Input);
}

#[tokio::test(start_paused = true)]
async fn push_asks_then_reports() {
    let (mut app, mut rx) = new_app();
    type_text(&mut app, "blog");
    app.handle_action(Action::Submit);
    pump(&mut app, &mut rx, 5_000).await;

    app.handle_action(Action::Push);
    let modal = app.modal.clone().unwrap();
    assert_eq!(modal.message, "Connect GitHub Account to push repo?");
    assert!(draw(&app).contains("Connect GitHub Account"));

    app.handle_action(Action::Confirm);
    assert!(app.modal.is_none());
    assert!(app.state().project.hosting_connected);
    assert_eq!(
        latest(&app),
        (
            NotificationLevel::Info,
            "GitHub Connected! Pushing repo 'vibe-app'...".to_string()
        )
    );

    pump(&mut app, &mut rx, 1_600).await;
    assert_eq!(
        latest(&app),
        (
            NotificationLevel::Success,
            "Push successful: https://github.com/user/vibe-app".to_string()
        )
    );

    app.handle_action(Action::Push);
    assert!(app.modal.is_none());
    assert_eq!(
        latest(&app),
        (NotificationLevel::Info, "Pushing changes to origin...".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_push_stays_disconnected() {
    let (mut app, mut rx) = new_app();
    type_text(&mut app, "shop");
    app.handle_action(Action::Submit);
    pump(&mut app, &mut rx, 5_000).await;

    app.handle_action(Action::Push);
    app.handle_action(Action::Cancel);
    assert!(app.modal.is_none());
    assert!(!app.state().project.hosting_connected);
}
