use serde::{Deserialize, Serialize};

/// Problem difficulty, as LeetCode defines it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, poise::ChoiceParameter,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse of an upstream difficulty string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Discord embed accent color for this difficulty.
    pub fn color(&self) -> u32 {
        match self {
            Self::Easy => 0x57F287,
            Self::Medium => 0xFEE75C,
            Self::Hard => 0xED4245,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalogue entry. Paid-only problems are filtered out before one of
/// these is ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Stable upstream identifier.
    pub id: String,
    /// Human-facing problem number (differs from `id` for some problems).
    pub frontend_id: String,
    pub title: String,
    pub slug: String,
    pub difficulty: Difficulty,
    /// Acceptance rate as a percentage in [0, 100], two decimal places.
    pub acceptance_rate: f64,
    pub tags: Vec<String>,
}

impl Problem {
    pub fn url(&self) -> String {
        format!("https://leetcode.com/problems/{}/", self.slug)
    }
}

/// Optional lookup constraints, ANDed together.
#[derive(Debug, Clone, Default)]
pub struct ProblemFilter {
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
}

impl ProblemFilter {
    pub fn matches(&self, problem: &Problem) -> bool {
        if let Some(difficulty) = self.difficulty {
            if problem.difficulty != difficulty {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !problem
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(category))
            {
                return false;
            }
        }
        true
    }
}

/// Immutable unit of persistence and in-memory state. Replaced wholesale on
/// refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueSnapshot {
    pub problems: Vec<Problem>,
    /// Distinct tags across `problems`, sorted case-insensitively.
    pub categories: Vec<String>,
}

impl CatalogueSnapshot {
    pub fn new(problems: Vec<Problem>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for problem in &problems {
            for tag in &problem.tags {
                if !categories.iter().any(|c| c == tag) {
                    categories.push(tag.clone());
                }
            }
        }
        categories.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        Self {
            problems,
            categories,
        }
    }

    pub fn empty() -> Self {
        Self {
            problems: Vec::new(),
            categories: Vec::new(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_problem(id: &str, difficulty: Difficulty, tags: &[&str]) -> Problem {
    Problem {
        id: id.to_string(),
        frontend_id: id.to_string(),
        title: format!("Problem {}", id),
        slug: format!("problem-{}", id),
        difficulty,
        acceptance_rate: 50.0,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
