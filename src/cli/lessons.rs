//! Lessons commands implementation

use anyhow::Result;
use chrono::Utc;

use chamcode::catalog::Lesson;
use chamcode::store::ProfileStore;

use super::print_events;

/// List the lesson catalog with the active profile's completion status
pub fn lessons_command(store: &ProfileStore, user_id: &str) -> Result<()> {
    let completions = store.query().completed_lessons(user_id)?;
    let completed: Vec<&str> = completions.iter().map(|c| c.lesson_id.as_str()).collect();

    println!("Lessons ({}):\n", Lesson::all().len());
    for lesson in Lesson::all() {
        let marker = if completed.contains(&lesson.id) {
            "✓"
        } else {
            " "
        };
        println!(
            "  [{}] {} {} ({}, {}) - {} XP",
            marker,
            lesson.icon,
            lesson.title,
            lesson.kind.label(),
            lesson.difficulty.label(),
            lesson.xp_reward
        );
        println!("      {} - {}", lesson.id, lesson.description);
    }

    let earned: u32 = completions
        .iter()
        .filter_map(|c| Lesson::get(&c.lesson_id))
        .map(|l| l.xp_reward)
        .sum();
    println!(
        "\nCompleted {} of {} lessons ({} / {} XP).",
        completions.len(),
        Lesson::all().len(),
        earned,
        Lesson::total_xp()
    );
    Ok(())
}

/// Complete a lesson and print the resulting progression events
pub fn complete_command(
    store: &ProfileStore,
    user_id: &str,
    lesson_id: &str,
    score: u32,
) -> Result<()> {
    let events = store
        .recorder()
        .record_lesson_completion(user_id, lesson_id, score, Utc::now())?;

    if events.is_empty() {
        println!("Lesson already completed - attempt recorded, no XP awarded.");
    } else {
        println!("Lesson complete!");
        print_events(&events);
    }
    Ok(())
}
