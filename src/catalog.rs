//! Static lesson catalog
//!
//! The lesson set is fixed seed data; completion rows reference lessons
//! by ID.

/// How a lesson is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonKind {
    MultipleChoice,
    FillInTheBlank,
    SyntaxPractice,
}

impl LessonKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "Multiple Choice",
            Self::FillInTheBlank => "Fill in the Blank",
            Self::SyntaxPractice => "Syntax Practice",
        }
    }
}

/// Lesson difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Lesson definition with display metadata and XP reward
#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: LessonKind,
    pub difficulty: Difficulty,
    pub xp_reward: u32,
    pub icon: &'static str,
    pub color: &'static str,
    pub order_index: u32,
}

/// All lesson definitions (must be sorted by order_index)
pub static LESSONS: &[Lesson] = &[
    Lesson {
        id: "lesson-1",
        title: "Variables & Data Types",
        description: "Understand strings, integers, and booleans.",
        kind: LessonKind::MultipleChoice,
        difficulty: Difficulty::Beginner,
        xp_reward: 25,
        icon: "💾",
        color: "#34D399",
        order_index: 1,
    },
    Lesson {
        id: "lesson-2",
        title: "Loops",
        description: "Practice for, while, and range loops.",
        kind: LessonKind::FillInTheBlank,
        difficulty: Difficulty::Medium,
        xp_reward: 35,
        icon: "🔄",
        color: "#60A5FA",
        order_index: 2,
    },
    Lesson {
        id: "lesson-3",
        title: "Functions",
        description: "Learn how to define and call functions.",
        kind: LessonKind::SyntaxPractice,
        difficulty: Difficulty::Hard,
        xp_reward: 45,
        icon: "⚙️",
        color: "#FF7F6B",
        order_index: 3,
    },
    Lesson {
        id: "lesson-4",
        title: "Lists & Dictionaries",
        description: "Use collections to store and retrieve data.",
        kind: LessonKind::MultipleChoice,
        difficulty: Difficulty::Beginner,
        xp_reward: 30,
        icon: "📚",
        color: "#A78BFA",
        order_index: 4,
    },
    Lesson {
        id: "lesson-5",
        title: "Object-Oriented Programming",
        description: "Master classes and objects in Python.",
        kind: LessonKind::FillInTheBlank,
        difficulty: Difficulty::Medium,
        xp_reward: 40,
        icon: "🏗️",
        color: "#60A5FA",
        order_index: 5,
    },
    Lesson {
        id: "lesson-6",
        title: "Error Handling",
        description: "Learn try-catch and debugging techniques.",
        kind: LessonKind::SyntaxPractice,
        difficulty: Difficulty::Hard,
        xp_reward: 50,
        icon: "🛠️",
        color: "#FF7F6B",
        order_index: 6,
    },
];

impl Lesson {
    /// Look up a lesson by ID
    pub fn get(id: &str) -> Option<&'static Lesson> {
        LESSONS.iter().find(|l| l.id == id)
    }

    /// All lessons in catalog order
    pub fn all() -> &'static [Lesson] {
        LESSONS
    }

    /// Total XP available from the whole catalog
    pub fn total_xp() -> u32 {
        LESSONS.iter().map(|l| l.xp_reward).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = LESSONS.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), LESSONS.len());
    }

    #[test]
    fn test_order_indexes_contiguous() {
        for (i, lesson) in LESSONS.iter().enumerate() {
            assert_eq!(lesson.order_index, i as u32 + 1);
        }
    }

    #[test]
    fn test_rewards_positive() {
        assert!(LESSONS.iter().all(|l| l.xp_reward > 0));
        assert_eq!(Lesson::total_xp(), 225);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Lesson::get("lesson-3").unwrap().title, "Functions");
        assert!(Lesson::get("lesson-99").is_none());
    }
}
