/// Static rule-matching record for one career.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CareerProfile {
    pub name: &'static str,
    /// Interest and confidence topics that count towards this career.
    pub keywords: &'static [&'static str],
    /// Intent `nature` answer that earns the nature bonus.
    pub nature: &'static str,
    /// Work-style `roleType` answer that earns the role bonus.
    pub role_type: &'static str,
}

impl CareerProfile {
    pub fn has_keyword(&self, topic: &str) -> bool {
        self.keywords.contains(&topic)
    }
}

/// Career catalog. Declaration order is the tie-break order.
pub const CAREER_PROFILES: &[CareerProfile] = &[
    CareerProfile {
        name: "Data Scientist",
        keywords: &["numbers", "logic", "math", "coding", "research", "statistics"],
        nature: "applied",
        role_type: "Desk Job",
    },
    CareerProfile {
        name: "Backend Developer",
        keywords: &["building", "logic", "coding", "systems", "databases"],
        nature: "applied",
        role_type: "Desk Job",
    },
    CareerProfile {
        name: "UI/UX Designer",
        keywords: &["design", "creativity", "empathy", "communication", "art"],
        nature: "creative",
        role_type: "Hybrid",
    },
    CareerProfile {
        name: "Product Manager",
        keywords: &["explaining", "communication", "leadership", "business", "strategy"],
        nature: "applied",
        role_type: "Hybrid",
    },
    CareerProfile {
        name: "Research Scientist",
        keywords: &["research", "numbers", "math", "logic", "writing"],
        nature: "research",
        role_type: "Lab",
    },
    CareerProfile {
        name: "Mechanical Engineer",
        keywords: &["building", "math", "physics", "tinkering"],
        nature: "applied",
        role_type: "Field Work",
    },
    CareerProfile {
        name: "Teacher",
        keywords: &["explaining", "helping", "communication", "writing"],
        nature: "social",
        role_type: "Classroom",
    },
    CareerProfile {
        name: "Content Writer",
        keywords: &["writing", "storytelling", "creativity", "communication"],
        nature: "creative",
        role_type: "Remote",
    },
];
