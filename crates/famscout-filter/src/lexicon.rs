//! Category hint lists and exclusion keywords.
//!
//! Keys are lowercase phrases matched as substrings of the candidate's
//! combined text. Hint lists deliberately overlap ("play area" appears for
//! both playgrounds and dining) — scoring is per category and the best
//! category wins.

/// The five family-event categories a relevant candidate can fall into.
pub const CATEGORIES: [&str; 5] = [
    "indoor playground",
    "outdoor playground",
    "kids attractions",
    "malls",
    "kids dining",
];

/// Hint phrases per category, in [`CATEGORIES`] order.
pub(crate) const CATEGORY_HINTS: [&[&str]; 5] = [
    // indoor playground
    &[
        "indoor play",
        "soft play",
        "ball pit",
        "ball pool",
        "indoor playground",
        "indoor play area",
        "play zone",
        "kids play",
        "children play",
        "toddler play",
        "trampoline",
        "bounce",
        "bouncy castle",
        "climbing frame",
        "play structure",
        "playground equipment",
        "play centre",
        "play center",
        "activity centre",
        "playroom",
        "kids zone",
    ],
    // outdoor playground
    &[
        "outdoor playground",
        "outdoor play",
        "play park",
        "adventure playground",
        "nature playground",
        "slide",
        "swings",
        "seesaw",
        "sandbox",
        "sand pit",
        "water play",
        "splash pad",
        "splash park",
        "water park",
        "garden play",
        "outdoor gym",
        "skate park",
        "bike park",
        "recreation park",
        "shaded",
        "inclusive playground",
    ],
    // kids attractions
    &[
        "zoo",
        "wildlife park",
        "safari",
        "aquarium",
        "theme park",
        "amusement park",
        "museum",
        "science centre",
        "science center",
        "art gallery",
        "adventure park",
        "escape room",
        "carnival",
        "art workshop",
        "exhibition",
        "performance",
        "theatre",
        "theater",
        "family attraction",
        "kids attraction",
        "planetarium",
        "botanical garden",
        "garden",
        "nature reserve",
        "heritage",
        "cultural centre",
        "festival",
        "fair",
        "showcase",
        "farm",
        "light show",
        "lights show",
    ],
    // malls
    &[
        "mall",
        "shopping mall",
        "shopping centre",
        "shopping center",
        "shopping complex",
        "plaza",
        "retail",
        "department store",
        "outlet",
        "shopping arcade",
        "mascot",
        "meet and greet",
        "pop-up",
        "mall show",
        "mall event",
    ],
    // kids dining
    &[
        "restaurant",
        "cafe",
        "café",
        "brunch",
        "dining",
        "eatery",
        "bistro",
        "food court",
        "kids menu",
        "children menu",
        "family menu",
        "family-friendly",
        "family friendly",
        "kid-friendly",
        "kid friendly",
        "child-friendly",
        "buffet",
        "high tea",
        "afternoon tea",
        "kids dine free",
        "high chair",
        "stroller parking",
    ],
];

/// Phrases that immediately mark a candidate non-relevant regardless of
/// category score: classes, school admissions and adjacent advertising are
/// not one-off family events.
pub(crate) const EXCLUSION_KEYWORDS: &[&str] = &[
    "tuition",
    "enrichment class",
    "enrichment program",
    "regular class",
    "trial class",
    "open house",
    "openhouse",
    "preschool",
    "primary school",
    "secondary school",
    "university",
    "baby fair",
    "maternity fair",
    "maternity expo",
    "consultation",
    "regular weekly",
    "ongoing class",
    "course enrollment",
    "university application",
    "school enrollment",
];
