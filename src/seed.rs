//! Default board shown when nothing usable has been stored yet.

use crate::board::Board;
use crate::fields::{Status, TagColor};
use crate::task::{Task, TaskId};

const SEED: [(&str, &str, &str, Status, &str, TagColor); 6] = [
    (
        "1",
        "Design System Setup",
        "Create a comprehensive design system with components and guidelines",
        Status::Todo,
        "Design",
        TagColor::Purple,
    ),
    (
        "2",
        "API Integration",
        "Integrate REST API endpoints for user authentication and data management",
        Status::Todo,
        "Backend",
        TagColor::Green,
    ),
    (
        "3",
        "User Dashboard",
        "Build responsive dashboard with analytics and user preferences",
        Status::Inprogress,
        "Frontend",
        TagColor::Blue,
    ),
    (
        "4",
        "Database Migration",
        "Migrate legacy data to new database schema",
        Status::Inprogress,
        "Backend",
        TagColor::Green,
    ),
    (
        "5",
        "Landing Page",
        "Create marketing landing page with hero section and features",
        Status::Done,
        "Frontend",
        TagColor::Blue,
    ),
    (
        "6",
        "Testing Suite",
        "Implement comprehensive testing with unit and integration tests",
        Status::Done,
        "QA",
        TagColor::Orange,
    ),
];

pub fn seed_tasks() -> Vec<Task> {
    SEED.iter()
        .map(|&(id, title, description, status, tag, tag_color)| Task {
            id: TaskId::new(id),
            title: title.to_string(),
            description: description.to_string(),
            status,
            tag: tag.to_string(),
            tag_color,
        })
        .collect()
}

pub fn seed_board() -> Board {
    Board::from_tasks(seed_tasks()).unwrap_or_default()
}
