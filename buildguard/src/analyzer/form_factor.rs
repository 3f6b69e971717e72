//! Form factor compatibility
//!
//! A case built for a larger motherboard standard physically accepts smaller
//! boards. Names are normalized (case, `_` vs `-`, common aliases) and then
//! compared through a fixed size ordinal. Names the table does not know are
//! only compatible when identical.

use serde::{Deserialize, Serialize};

/// Size ordinal per normalized standard, largest first.
pub const FORM_FACTOR_ORDINALS: [(&str, u8); 5] = [
    ("e-atx", 4),
    ("xl-atx", 3),
    ("atx", 2),
    ("micro-atx", 1),
    ("mini-itx", 0),
];

const ALIASES: [(&str, &str); 5] = [
    ("matx", "micro-atx"),
    ("µatx", "micro-atx"),
    ("uatx", "micro-atx"),
    ("mitx", "mini-itx"),
    ("itx", "mini-itx"),
];

/// How a case's declared support relates to a board's form factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormFactorMatch {
    /// Same standard after normalization.
    Same,
    /// The case takes a larger standard than the board.
    Accommodates,
    /// The board is larger than anything the case takes.
    TooSmall,
    /// At least one name is outside the ordinal table and they differ.
    Unrecognized,
}

impl FormFactorMatch {
    pub fn is_compatible(self) -> bool {
        matches!(self, FormFactorMatch::Same | FormFactorMatch::Accommodates)
    }
}

/// Lower-case, `_` → `-`, then map known aliases.
pub fn normalize_form_factor(raw: &str) -> String {
    let cleaned = raw.trim().to_lowercase().replace('_', "-");
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == cleaned)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(cleaned)
}

/// Ordinal of an already normalized name.
pub fn form_factor_ordinal(normalized: &str) -> Option<u8> {
    FORM_FACTOR_ORDINALS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, ordinal)| *ordinal)
}

pub fn match_form_factor(case_support: &str, board_form_factor: &str) -> FormFactorMatch {
    let case_ff = normalize_form_factor(case_support);
    let board_ff = normalize_form_factor(board_form_factor);

    if case_ff == board_ff {
        return FormFactorMatch::Same;
    }

    match (form_factor_ordinal(&case_ff), form_factor_ordinal(&board_ff)) {
        (Some(case_size), Some(board_size)) if case_size >= board_size => {
            FormFactorMatch::Accommodates
        }
        (Some(_), Some(_)) => FormFactorMatch::TooSmall,
        _ => FormFactorMatch::Unrecognized,
    }
}

/// Whether a case declaring `case_support` fits a `board_form_factor` board.
pub fn is_form_factor_compatible(case_support: &str, board_form_factor: &str) -> bool {
    match_form_factor(case_support, board_form_factor).is_compatible()
}
