//! Visibility engine: per-leaf hidden flags.
//!
//! Only hideable leaves ever change state. Requests touching a fixed or
//! unknown leaf are ignored without error.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::layout::LeafMeta;

/// A `display` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityCommand {
    ShowAll,
    HideAll,
    Show(usize),
    Hide(usize),
}

impl FromStr for VisibilityCommand {
    type Err = ConfigurationError;

    /// Parses `show_all`, `hide_all`, `show:N` and `hide:N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidCommand(s.to_string());
        let s = s.trim();
        match s {
            "show_all" => return Ok(Self::ShowAll),
            "hide_all" => return Ok(Self::HideAll),
            _ => {}
        }
        let (verb, arg) = s.split_once(':').ok_or_else(invalid)?;
        let index: usize = arg.trim().parse().map_err(|_| invalid())?;
        match verb.trim() {
            "show" => Ok(Self::Show(index)),
            "hide" => Ok(Self::Hide(index)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for VisibilityCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowAll => f.write_str("show_all"),
            Self::HideAll => f.write_str("hide_all"),
            Self::Show(i) => write!(f, "show:{i}"),
            Self::Hide(i) => write!(f, "hide:{i}"),
        }
    }
}

/// Hidden flag per leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    hidden: Vec<bool>,
}

impl Visibility {
    /// All `width` leaves visible.
    pub fn new(width: usize) -> Self {
        Self {
            hidden: vec![false; width],
        }
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    pub fn flags(&self) -> &[bool] {
        &self.hidden
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.iter().filter(|h| **h).count()
    }

    /// Set one leaf's flag. Returns whether anything changed.
    pub fn set(&mut self, leaves: &[LeafMeta], index: usize, hidden: bool) -> bool {
        let hideable = leaves.get(index).is_some_and(|l| l.column.hideable);
        if !hideable {
            log::debug!("ignoring visibility change for fixed or unknown column {index}");
            return false;
        }
        match self.hidden.get_mut(index) {
            Some(flag) if *flag != hidden => {
                *flag = hidden;
                true
            }
            _ => false,
        }
    }

    /// Set every hideable leaf's flag. Returns whether anything changed.
    pub fn set_all(&mut self, leaves: &[LeafMeta], hidden: bool) -> bool {
        let mut changed = false;
        for leaf in leaves.iter().filter(|l| l.column.hideable) {
            if let Some(flag) = self.hidden.get_mut(leaf.index)
                && *flag != hidden
            {
                *flag = hidden;
                changed = true;
            }
        }
        changed
    }

    /// Run a display command. Returns whether anything changed.
    pub fn apply(&mut self, leaves: &[LeafMeta], command: VisibilityCommand) -> bool {
        match command {
            VisibilityCommand::ShowAll => self.set_all(leaves, false),
            VisibilityCommand::HideAll => self.set_all(leaves, true),
            VisibilityCommand::Show(i) => self.set(leaves, i, false),
            VisibilityCommand::Hide(i) => self.set(leaves, i, true),
        }
    }

    /// Adopt previously saved flags. Fixed leaves stay visible and extra or
    /// missing entries are ignored, so a stale saved state cannot break the
    /// grid.
    pub fn restore(&mut self, leaves: &[LeafMeta], flags: &[bool]) {
        for leaf in leaves {
            let saved = flags.get(leaf.index).copied().unwrap_or(false);
            if let Some(flag) = self.hidden.get_mut(leaf.index) {
                *flag = leaf.column.hideable && saved;
            }
        }
    }
}
