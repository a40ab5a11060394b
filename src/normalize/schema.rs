//! Static per-category source schemas
//!
//! Each category sheet uses FBref's terse header vocabulary. These tables are the
//! binding contract with the source files: every rename key, drop column and
//! passthrough column listed here must be present in the sheet.

use crate::model::{Category, PLAYER, SQUAD};

/// Categorical columns that repeat in every category sheet
const CATEGORICAL: &[&str] = &["Pos", "Age", "Born", "90s", "Nation", "Matches"];

/// Pass types also repeats total passes attempted from the passing sheet
const CATEGORICAL_PASS_TYPES: &[&str] = &["Pos", "Age", "Born", "90s", "Nation", "Att", "Matches"];

/// Source-code to descriptive-label mapping, plus the columns removed and
/// the untouched columns downstream selection relies on
#[derive(Debug)]
pub struct CategorySchema {
    pub category: Category,
    pub renames: &'static [(&'static str, &'static str)],
    pub drops: &'static [&'static str],
    pub passthrough: &'static [&'static str],
}

impl CategorySchema {
    /// Every column the source sheet must provide
    pub fn expected_columns(&self) -> Vec<&'static str> {
        let mut cols = vec![PLAYER, SQUAD];
        cols.extend(self.renames.iter().map(|(from, _)| *from));
        cols.extend(self.drops.iter().copied());
        cols.extend(self.passthrough.iter().copied());
        cols
    }

    /// Descriptive label for a source code, if this category renames it
    pub fn renamed(&self, source: &str) -> Option<&'static str> {
        self.renames
            .iter()
            .find(|(from, _)| *from == source)
            .map(|(_, to)| *to)
    }
}

static STANDARD: CategorySchema = CategorySchema {
    category: Category::Standard,
    renames: &[
        ("Gls", "Goals Scored"),
        ("Ast", "Assists"),
        ("G+A", "Goals + Assists"),
        ("Min", "Minutes Played"),
        ("xG", "Expected Goals"),
        ("xAG", "Expected Assists"),
        ("PK", "Penalties Scored"),
        ("PKatt", "Penalties Attempted"),
        ("CrdY", "Yellow Cards"),
        ("CrdR", "Red Cards"),
        ("PrgC", "Progressive Carries"),
        ("PrgP", "Progressive Passes"),
        ("PrgR", "Progressive Passes Received"),
        ("G-PK", "Non-Penalty Goals"),
        ("npxG", "Non-Penalty Expected Goals"),
    ],
    // Anchor table keeps its categorical columns
    drops: &[],
    passthrough: &[],
};

static POSSESSION: CategorySchema = CategorySchema {
    category: Category::Possession,
    renames: &[
        ("Att 3rd", "Touches in the Attacking Third"),
        ("TotDist", "Total Carry Distance"),
        ("Att", "Dribbles Attempted"),
        ("Succ%", "Dribble Success %"),
        ("1/3", "Carries Into the Final Third"),
        ("CPA", "Carries into the Penalty Area"),
        ("Rec", "Passes Received"),
        ("PrgR", "Progressive Passes Received"),
        ("Def Pen", "Touches in the Defensive Penalty Area"),
        ("Def 3rd", "Defensive 1/3 Touches"),
        ("Mid 3rd", "Middle 1/3 Touches"),
        ("Att Pen", "Attacking Penalty Area Touches"),
    ],
    drops: CATEGORICAL,
    passthrough: &["Touches", "Carries", "PrgDist", "PrgC", "Live"],
};

static PASSING: CategorySchema = CategorySchema {
    category: Category::Passing,
    renames: &[
        ("KP", "Key Passes"),
        ("CrsPA", "Crosses into the Penalty Area"),
        ("PPA", "Passes into the Penalty Area"),
        ("A-xAG", "Assists Overperformance"),
        ("Att", "Passes Attempted"),
        ("Cmp%", "Pass Completion %"),
    ],
    drops: CATEGORICAL,
    passthrough: &[
        "TotDist", "PrgDist", "Cmp.1", "Att.1", "Cmp%.1", "Cmp.2", "Att.2", "Cmp%.2", "Cmp.3",
        "Att.3", "Cmp%.3",
    ],
};

static PASS_TYPES: CategorySchema = CategorySchema {
    category: Category::PassTypes,
    renames: &[("Sw", "Switches")],
    drops: CATEGORICAL_PASS_TYPES,
    passthrough: &["Live", "Dead", "TB", "Crs", "CK"],
};

static MISC: CategorySchema = CategorySchema {
    category: Category::Misc,
    renames: &[
        ("Recov", "Recoveries"),
        ("Won%", "Aerial Duel Success Rate"),
        ("Fls", "Fouls"),
        ("Fld", "Fouls Drawn"),
        ("PKwon", "Penalty Kicks Won"),
    ],
    drops: CATEGORICAL,
    passthrough: &["PKcon", "Won", "Crs", "Int", "TklW"],
};

static DEFENSIVE: CategorySchema = CategorySchema {
    category: Category::Defensive,
    renames: &[("Tkl", "Tackles")],
    drops: CATEGORICAL,
    passthrough: &[
        "TklW", "Def 3rd", "Mid 3rd", "Att 3rd", "Int", "Tkl+Int", "Clr", "Err",
    ],
};

/// Static schema for a category
pub fn schema(category: Category) -> &'static CategorySchema {
    match category {
        Category::Standard => &STANDARD,
        Category::Possession => &POSSESSION,
        Category::Passing => &PASSING,
        Category::PassTypes => &PASS_TYPES,
        Category::Misc => &MISC,
        Category::Defensive => &DEFENSIVE,
    }
}
