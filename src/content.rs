pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub struct Course {
    pub title: &'static str,
    pub level: &'static str,
    pub blurb: &'static str,
}

pub struct Tutorial {
    pub title: &'static str,
    pub category: &'static str,
    pub length: &'static str,
}

pub struct FilterButton {
    pub label: &'static str,
    pub value: &'static str,
}

pub const BRAND: &str = "Studio Motion";

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        label: "Philosophy",
        href: "#philosophy",
    },
    NavLink {
        label: "Courses",
        href: "#courses",
    },
    NavLink {
        label: "Tutorials",
        href: "#tutorials",
    },
    NavLink {
        label: "Contact",
        href: "#contact",
    },
];

pub const HERO_LINES: &[&str] = &["Design that", "moves with", "intent."];
pub const HERO_SUBTITLE: &str =
    "Courses and hands-on tutorials on motion, interaction and the craft of the web.";
pub const HERO_CTA: &str = "Browse courses";

pub const PHILOSOPHY: &[&str] = &[
    "Motion is a language, not a decoration.",
    "Every transition should answer a question the user just asked.",
    "Slow down. Then remove what does not need to move.",
];

pub const COURSES: &[Course] = &[
    Course {
        title: "Foundations of Motion",
        level: "Beginner",
        blurb: "Timing, easing and choreography from first principles.",
    },
    Course {
        title: "Scroll Storytelling",
        level: "Intermediate",
        blurb: "Pin, reveal and sequence content as the reader scrolls.",
    },
    Course {
        title: "Interaction Systems",
        level: "Advanced",
        blurb: "Cursor, hover and gesture feedback that scales across a product.",
    },
];

pub const FILTERS: &[FilterButton] = &[
    FilterButton {
        label: "All",
        value: "all",
    },
    FilterButton {
        label: "Video",
        value: "video",
    },
    FilterButton {
        label: "Article",
        value: "article",
    },
    FilterButton {
        label: "Workshop",
        value: "workshop",
    },
];

pub const TUTORIALS: &[Tutorial] = &[
    Tutorial {
        title: "Easing curves, visually",
        category: "video",
        length: "12 min",
    },
    Tutorial {
        title: "Staggering without the noise",
        category: "article",
        length: "6 min read",
    },
    Tutorial {
        title: "Building a cursor follower",
        category: "video",
        length: "18 min",
    },
    Tutorial {
        title: "Reduced motion done right",
        category: "article",
        length: "9 min read",
    },
    Tutorial {
        title: "Scroll-linked color stories",
        category: "workshop",
        length: "2 h",
    },
];

/// Section id, background color applied while it sits at the viewport
/// midpoint.
pub const SECTION_COLORS: &[(&str, &str)] = &[
    ("hero", "#0f0f0f"),
    ("philosophy", "#1b1b1f"),
    ("courses", "#13202b"),
    ("tutorials", "#201a14"),
    ("contact", "#0f0f0f"),
];

pub fn section_color(id: &str) -> Option<&'static str> {
    SECTION_COLORS
        .iter()
        .find(|(section, _)| *section == id)
        .map(|(_, color)| *color)
}

pub const CONTACT_EMAIL: &str = "hello@studiomotion.dev";
