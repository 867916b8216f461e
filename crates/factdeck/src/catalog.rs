use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// The fixed set of categories shown on the home screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Category {
    Animals,
    Architecture,
    Chemistry,
    Energy,
    Environment,
    Health,
    Music,
    Physics,
    Space,
    Technology,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Animals,
        Category::Architecture,
        Category::Chemistry,
        Category::Energy,
        Category::Environment,
        Category::Health,
        Category::Music,
        Category::Physics,
        Category::Space,
        Category::Technology,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Animals => "Animals",
            Self::Architecture => "Architecture",
            Self::Chemistry => "Chemistry",
            Self::Energy => "Energy",
            Self::Environment => "Environment",
            Self::Health => "Health",
            Self::Music => "Music",
            Self::Physics => "Physics",
            Self::Space => "Space",
            Self::Technology => "Technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {s}"))
    }
}
