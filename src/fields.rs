//! Enumerations and field types for board tasks.
//!
//! This module defines the three board statuses and the fixed tag colour
//! palette, together with the literal tokens they use in the stored snapshot.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Column a task currently sits in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[value(alias = "to-do")]
    Todo,
    #[value(aliases = ["in-progress", "doing"])]
    #[serde(alias = "in-progress")]
    Inprogress,
    Done,
}

impl Status {
    /// All statuses in column order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::Inprogress, Status::Done];

    /// Literal token used in the stored snapshot and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Inprogress => "inprogress",
            Status::Done => "done",
        }
    }

    /// Column heading.
    pub fn title(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::Inprogress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Position of the column on the board.
    pub fn column(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::Inprogress => 1,
            Status::Done => 2,
        }
    }

    pub fn from_column(index: usize) -> Option<Status> {
        Status::ALL.get(index).copied()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style token attached to a task's tag. Chosen once at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TagColor {
    #[default]
    #[serde(rename = "bg-blue-500")]
    Blue,
    #[serde(rename = "bg-green-500")]
    Green,
    #[serde(rename = "bg-purple-500")]
    Purple,
    #[serde(rename = "bg-orange-500")]
    Orange,
    #[serde(rename = "bg-red-500")]
    Red,
    #[serde(rename = "bg-yellow-500")]
    Yellow,
    #[serde(rename = "bg-pink-500")]
    Pink,
    #[serde(rename = "bg-indigo-500")]
    Indigo,
}

impl TagColor {
    /// The palette new tasks draw from, in token order.
    pub const PALETTE: [TagColor; 8] = [
        TagColor::Blue,
        TagColor::Green,
        TagColor::Purple,
        TagColor::Orange,
        TagColor::Red,
        TagColor::Yellow,
        TagColor::Pink,
        TagColor::Indigo,
    ];

    pub fn token(self) -> &'static str {
        match self {
            TagColor::Blue => "bg-blue-500",
            TagColor::Green => "bg-green-500",
            TagColor::Purple => "bg-purple-500",
            TagColor::Orange => "bg-orange-500",
            TagColor::Red => "bg-red-500",
            TagColor::Yellow => "bg-yellow-500",
            TagColor::Pink => "bg-pink-500",
            TagColor::Indigo => "bg-indigo-500",
        }
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_literal_tokens() {
        assert_eq!(serde_json::to_string(&Status::Inprogress).unwrap(), "\"inprogress\"");
        let parsed: Status = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, Status::Done);
        assert!(serde_json::from_str::<Status>("\"blocked\"").is_err());
    }

    #[test]
    fn columns_follow_status_order() {
        for status in Status::ALL {
            assert_eq!(Status::from_column(status.column()), Some(status));
        }
        assert_eq!(Status::from_column(3), None);
    }

    #[test]
    fn palette_tokens_match_serialized_form() {
        for color in TagColor::PALETTE {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.token()));
        }
    }
}
