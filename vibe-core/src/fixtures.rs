//! Fixed startup data and the hardcoded scaffold revealed by the coder stage.

use crate::{Agent, AgentRole, FileNode, Project};

pub const INITIAL_PROJECT_NAME: &str = "untitled-vibe";
pub const GENERATED_PROJECT_NAME: &str = "generated-vibe-app";

const APP_PLACEHOLDER: &str = "// Enter your vibe idea to generate code...";

const HEADER_TSX: &str = "import React from 'react';\n\nexport const Header = () => <header className=\"p-4 bg-black text-white\">Vibe App</header>;";

const HERO_TSX: &str = "import React from 'react';\nimport { motion } from 'framer-motion';\n\nexport const Hero = () => (\n  <div className=\"h-screen flex items-center justify-center\">\n    <h1 className=\"text-6xl font-bold bg-clip-text text-transparent bg-gradient-to-r from-blue-400 to-purple-600\">Vibe On.</h1>\n  </div>\n);";

const APP_TSX: &str = "import React from 'react';\nimport { Header } from './components/Header';\nimport { Hero } from './components/Hero';\n\nexport default function App() {\n  return (\n    <main className=\"bg-gray-900 min-h-screen\">\n      <Header />\n      <Hero />\n    </main>\n  );\n}";

/// The fixed roster, one agent per scheduled role.
pub fn initial_agents() -> Vec<Agent> {
    vec![
        Agent::new("mgr-1", "Atlas", AgentRole::Coordinator),
        Agent::new("arc-1", "Architect", AgentRole::Architect),
        Agent::new("mcp-1", "Connector", AgentRole::Integrator),
        Agent::new("dev-1", "VibeCoder", AgentRole::Coder),
    ]
}

/// A single placeholder `src/App.tsx`.
pub fn initial_project() -> Project {
    Project {
        id: "proj-1".to_string(),
        name: INITIAL_PROJECT_NAME.to_string(),
        files: vec![FileNode::directory(
            "root",
            "src",
            "/src",
            vec![FileNode::file("f1", "App.tsx", "/src/App.tsx", APP_PLACEHOLDER)
                .with_language("typescript")],
        )],
        knowledge_connected: false,
        hosting_connected: false,
        repository_url: None,
        description: None,
    }
}

/// Header + Hero components and an App that mounts them.
pub fn generated_scaffold() -> Vec<FileNode> {
    vec![FileNode::directory(
        "root",
        "src",
        "/src",
        vec![
            FileNode::directory(
                "comp",
                "components",
                "/src/components",
                vec![
                    FileNode::file("f2", "Header.tsx", "/src/components/Header.tsx", HEADER_TSX),
                    FileNode::file("f3", "Hero.tsx", "/src/components/Hero.tsx", HERO_TSX),
                ],
            ),
            FileNode::file("f1", "App.tsx", "/src/App.tsx", APP_TSX),
        ],
    )]
}
