use std::fmt;

/// One statistical category sheet per league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Standard,
    Possession,
    Passing,
    PassTypes,
    Misc,
    Defensive,
}

impl Category {
    /// All categories in merge order (standard is the anchor)
    pub const ALL: [Category; 6] = [
        Category::Standard,
        Category::Possession,
        Category::Passing,
        Category::PassTypes,
        Category::Misc,
        Category::Defensive,
    ];

    /// Short tag used to disambiguate columns that recur across categories
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Standard => "std",
            Category::Possession => "poss",
            Category::Passing => "pass",
            Category::PassTypes => "ptype",
            Category::Misc => "misc",
            Category::Defensive => "def",
        }
    }

    /// File stem of the source workbook, e.g. `pl_defensive_actions.xlsx`
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::Standard => "standard",
            Category::Possession => "possession",
            Category::Passing => "passing",
            Category::PassTypes => "pass_types",
            Category::Misc => "misc",
            Category::Defensive => "defensive_actions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Standard => "Standard",
            Category::Possession => "Possession",
            Category::Passing => "Passing",
            Category::PassTypes => "Pass Types",
            Category::Misc => "Miscellaneous",
            Category::Defensive => "Defensive Actions",
        };
        write!(f, "{}", name)
    }
}

/// Season totals vs. rate-normalized sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Raw,
    Per90,
}

impl Granularity {
    pub const ALL: [Granularity; 2] = [Granularity::Raw, Granularity::Per90];

    /// Worksheet name inside each category workbook
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Granularity::Raw => "raw",
            Granularity::Per90 => "per_90",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Raw => write!(f, "Raw"),
            Granularity::Per90 => write!(f, "Per 90"),
        }
    }
}
