//! Static framework catalog: CARE and CLEAR steps, conversation types,
//! practice scenarios and their personas.
//!
//! Everything here is immutable process-wide data. Per-letter maps are
//! fixed-field structs ([`CareMap`], [`ClearMap`]) so every letter is always
//! present; there is no way to build a map with a missing or extra key.

use serde::{Deserialize, Serialize};

use crate::types::null_as_default;

// ---------------------------------------------------------------------------
// Letters
// ---------------------------------------------------------------------------

/// A step of the CARE (warmth) framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareLetter {
    #[serde(rename = "C")]
    Connection,
    #[serde(rename = "A")]
    Acknowledge,
    #[serde(rename = "R")]
    Respect,
    #[serde(rename = "E")]
    Empathy,
}

impl CareLetter {
    /// All CARE letters in framework order.
    pub const ALL: [CareLetter; 4] = [
        CareLetter::Connection,
        CareLetter::Acknowledge,
        CareLetter::Respect,
        CareLetter::Empathy,
    ];

    pub fn letter(self) -> char {
        self.step().letter
    }

    pub fn step(self) -> &'static FrameworkStep {
        &CARE_STEPS[self.index()]
    }

    pub fn index(self) -> usize {
        match self {
            CareLetter::Connection => 0,
            CareLetter::Acknowledge => 1,
            CareLetter::Respect => 2,
            CareLetter::Empathy => 3,
        }
    }
}

/// A step of the CLEAR (structure) framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearLetter {
    #[serde(rename = "C")]
    Context,
    #[serde(rename = "L")]
    ListenFirst,
    #[serde(rename = "E")]
    Expectations,
    #[serde(rename = "A")]
    Agreements,
    #[serde(rename = "R")]
    Revisit,
}

impl ClearLetter {
    /// All CLEAR letters in framework order.
    pub const ALL: [ClearLetter; 5] = [
        ClearLetter::Context,
        ClearLetter::ListenFirst,
        ClearLetter::Expectations,
        ClearLetter::Agreements,
        ClearLetter::Revisit,
    ];

    pub fn letter(self) -> char {
        self.step().letter
    }

    pub fn step(self) -> &'static FrameworkStep {
        &CLEAR_STEPS[self.index()]
    }

    pub fn index(self) -> usize {
        match self {
            ClearLetter::Context => 0,
            ClearLetter::ListenFirst => 1,
            ClearLetter::Expectations => 2,
            ClearLetter::Agreements => 3,
            ClearLetter::Revisit => 4,
        }
    }
}

/// A letter from either framework. Used where both checklists are addressed
/// through one entry point (live capture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "framework", content = "letter", rename_all = "lowercase")]
pub enum FrameworkLetter {
    Care(CareLetter),
    Clear(ClearLetter),
}

// ---------------------------------------------------------------------------
// Per-letter maps
// ---------------------------------------------------------------------------

/// One value per CARE letter. Serializes as `{"C": .., "A": .., "R": .., "E": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct CareMap<T> {
    #[serde(rename = "C", deserialize_with = "null_as_default")]
    pub connection: T,
    #[serde(rename = "A", deserialize_with = "null_as_default")]
    pub acknowledge: T,
    #[serde(rename = "R", deserialize_with = "null_as_default")]
    pub respect: T,
    #[serde(rename = "E", deserialize_with = "null_as_default")]
    pub empathy: T,
}

impl<T> CareMap<T> {
    pub fn get(&self, letter: CareLetter) -> &T {
        match letter {
            CareLetter::Connection => &self.connection,
            CareLetter::Acknowledge => &self.acknowledge,
            CareLetter::Respect => &self.respect,
            CareLetter::Empathy => &self.empathy,
        }
    }

    pub fn get_mut(&mut self, letter: CareLetter) -> &mut T {
        match letter {
            CareLetter::Connection => &mut self.connection,
            CareLetter::Acknowledge => &mut self.acknowledge,
            CareLetter::Respect => &mut self.respect,
            CareLetter::Empathy => &mut self.empathy,
        }
    }

    /// Iterate `(letter, value)` pairs in framework order.
    pub fn iter(&self) -> impl Iterator<Item = (CareLetter, &T)> {
        CareLetter::ALL.into_iter().map(move |l| (l, self.get(l)))
    }
}

/// One value per CLEAR letter. Serializes as `{"C", "L", "E", "A", "R"}` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ClearMap<T> {
    #[serde(rename = "C", deserialize_with = "null_as_default")]
    pub context: T,
    #[serde(rename = "L", deserialize_with = "null_as_default")]
    pub listen_first: T,
    #[serde(rename = "E", deserialize_with = "null_as_default")]
    pub expectations: T,
    #[serde(rename = "A", deserialize_with = "null_as_default")]
    pub agreements: T,
    #[serde(rename = "R", deserialize_with = "null_as_default")]
    pub revisit: T,
}

impl<T> ClearMap<T> {
    pub fn get(&self, letter: ClearLetter) -> &T {
        match letter {
            ClearLetter::Context => &self.context,
            ClearLetter::ListenFirst => &self.listen_first,
            ClearLetter::Expectations => &self.expectations,
            ClearLetter::Agreements => &self.agreements,
            ClearLetter::Revisit => &self.revisit,
        }
    }

    pub fn get_mut(&mut self, letter: ClearLetter) -> &mut T {
        match letter {
            ClearLetter::Context => &mut self.context,
            ClearLetter::ListenFirst => &mut self.listen_first,
            ClearLetter::Expectations => &mut self.expectations,
            ClearLetter::Agreements => &mut self.agreements,
            ClearLetter::Revisit => &mut self.revisit,
        }
    }

    /// Iterate `(letter, value)` pairs in framework order.
    pub fn iter(&self) -> impl Iterator<Item = (ClearLetter, &T)> {
        ClearLetter::ALL.into_iter().map(move |l| (l, self.get(l)))
    }
}

/// Free-text preparation answers for the CARE letters.
pub type CareAnswers = CareMap<String>;

/// Free-text preparation answers for the CLEAR letters.
pub type ClearAnswers = ClearMap<String>;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Display metadata for a single framework letter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkStep {
    pub letter: char,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    /// Display color; consumed by the UI only.
    pub color: &'static str,
    pub prompts: &'static [&'static str],
    pub placeholder: &'static str,
}

pub static CARE_STEPS: [FrameworkStep; 4] = [
    FrameworkStep {
        letter: 'C',
        title: "Connection",
        subtitle: "Start with relationship",
        description: "Lead with humanity",
        color: "#B8860B",
        prompts: &[
            "How will you open with genuine care?",
            "What shared purpose can you reference?",
        ],
        placeholder: "How will you establish connection?",
    },
    FrameworkStep {
        letter: 'A',
        title: "Acknowledge",
        subtitle: "Validate their experience",
        description: "See their reality",
        color: "#C9971C",
        prompts: &[
            "What challenges might they be facing?",
            "What strengths can you recognize?",
        ],
        placeholder: "What will you acknowledge?",
    },
    FrameworkStep {
        letter: 'R',
        title: "Respect",
        subtitle: "Assume positive intent",
        description: "Extend grace",
        color: "#DAA82D",
        prompts: &[
            "What's the most generous interpretation?",
            "What do you appreciate about this person?",
        ],
        placeholder: "Write your most generous interpretation...",
    },
    FrameworkStep {
        letter: 'E',
        title: "Empathy",
        subtitle: "Name the emotion",
        description: "Feel with them",
        color: "#EBB93E",
        prompts: &[
            "What might they be feeling?",
            "What would you need in their position?",
        ],
        placeholder: "What emotions might they be experiencing?",
    },
];

pub static CLEAR_STEPS: [FrameworkStep; 5] = [
    FrameworkStep {
        letter: 'C',
        title: "Context",
        subtitle: "What's the situation?",
        description: "Facts only",
        color: "#2D5A5A",
        prompts: &[
            "What are the observable facts? (Not interpretations)",
            "When and where did this occur?",
            "What specific behaviors are you addressing?",
        ],
        placeholder: "Describe using only observable facts...",
    },
    FrameworkStep {
        letter: 'L',
        title: "Listen First",
        subtitle: "Plan questions before statements",
        description: "Understand their perspective",
        color: "#3D6B6B",
        prompts: &[
            "What questions will help you understand?",
            "What assumptions do you need to set aside?",
        ],
        placeholder: "List the questions you want to ask...",
    },
    FrameworkStep {
        letter: 'E',
        title: "Expectations",
        subtitle: "What needs to change?",
        description: "Be specific and actionable",
        color: "#4D7C7C",
        prompts: &[
            "What specific change are you asking for?",
            "How will success be measured?",
        ],
        placeholder: "Describe the specific expectations...",
    },
    FrameworkStep {
        letter: 'A',
        title: "Agreements",
        subtitle: "What will we each commit to?",
        description: "Mutual accountability",
        color: "#5D8D8D",
        prompts: &["What will you commit to?", "What resources can you provide?"],
        placeholder: "Outline the mutual commitments...",
    },
    FrameworkStep {
        letter: 'R',
        title: "Revisit",
        subtitle: "When will we check in?",
        description: "Schedule follow-up",
        color: "#6D9E9E",
        prompts: &[
            "When will you follow up?",
            "What will you look for to assess progress?",
        ],
        placeholder: "Plan the follow-up timeline...",
    },
];

// ---------------------------------------------------------------------------
// Conversation types
// ---------------------------------------------------------------------------

/// Conversation-type taxonomy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    Performance,
    Parent,
    Colleague,
    Policy,
    Personal,
}

impl ConversationType {
    pub const ALL: [ConversationType; 5] = [
        ConversationType::Performance,
        ConversationType::Parent,
        ConversationType::Colleague,
        ConversationType::Policy,
        ConversationType::Personal,
    ];

    /// Stable identifier used in storage and on the wire.
    pub fn id(self) -> &'static str {
        match self {
            ConversationType::Performance => "performance",
            ConversationType::Parent => "parent",
            ConversationType::Colleague => "colleague",
            ConversationType::Policy => "policy",
            ConversationType::Personal => "personal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConversationType::Performance => "Performance Concern",
            ConversationType::Parent => "Parent Complaint",
            ConversationType::Colleague => "Colleague Conflict",
            ConversationType::Policy => "Policy Violation",
            ConversationType::Personal => "Personal Issue",
        }
    }

    /// Parse a stored identifier. Unknown values yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

/// Serializable `{id, label}` pair for catalog listings.
#[derive(Debug, Serialize)]
pub struct ConversationTypeInfo {
    pub id: &'static str,
    pub label: &'static str,
}

pub fn conversation_types() -> Vec<ConversationTypeInfo> {
    ConversationType::ALL
        .into_iter()
        .map(|t| ConversationTypeInfo {
            id: t.id(),
            label: t.label(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios and personas
// ---------------------------------------------------------------------------

/// A sample practice scenario shown in the Learn view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: i64,
    #[serde(rename = "type")]
    pub conversation_type: ConversationType,
    pub title: &'static str,
    pub description: &'static str,
    pub context: &'static str,
}

impl Scenario {
    /// Framing line that opens a practice transcript.
    pub fn framing(&self) -> String {
        format!("Scenario: {}\n\nContext: {}", self.description, self.context)
    }
}

/// Scripted counterpart used only in practice role-play.
///
/// Deliberately not `Serialize`: the hidden context must never leave the
/// server except through the model's in-character replies.
#[derive(Debug)]
pub struct ScenarioPersona {
    pub id: i64,
    pub name: &'static str,
    pub role: &'static str,
    pub personality: &'static str,
    pub hidden_context: &'static str,
    pub stance: &'static str,
}

pub static SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: 1,
        conversation_type: ConversationType::Performance,
        title: "Chronic Lateness",
        description: "A teacher has been consistently late to their first period class.",
        context: "Teacher arrives 5-10 minutes late, students are unsupervised.",
    },
    Scenario {
        id: 2,
        conversation_type: ConversationType::Parent,
        title: "Grade Dispute",
        description: "A parent is upset about their child's grade.",
        context: "Student received a C, parent emailed superintendent.",
    },
    Scenario {
        id: 3,
        conversation_type: ConversationType::Colleague,
        title: "Meeting Disruption",
        description: "A colleague consistently interrupts others in meetings.",
        context: "Last three PLCs have been derailed.",
    },
    Scenario {
        id: 4,
        conversation_type: ConversationType::Policy,
        title: "Cell Phone Use",
        description: "Staff member using phone during instruction.",
        context: "Observed twice by admin.",
    },
    Scenario {
        id: 5,
        conversation_type: ConversationType::Personal,
        title: "Quality Decline",
        description: "Excellent employee work quality has declined.",
        context: "Missed deadlines, incomplete work.",
    },
];

pub static PERSONAS: [ScenarioPersona; 5] = [
    ScenarioPersona {
        id: 1,
        name: "Ms. Rodriguez",
        role: "3rd-year teacher",
        personality: "Generally committed, currently overwhelmed",
        hidden_context: "Dealing with childcare challenges since daycare hours changed",
        stance: "Slightly defensive, embarrassed about the situation",
    },
    ScenarioPersona {
        id: 2,
        name: "Mr. Thompson",
        role: "Parent of 7th grader",
        personality: "Protective, feels unheard",
        hidden_context: "Child has been struggling socially, grade feels like another failure",
        stance: "Frustrated, ready to advocate for child",
    },
    ScenarioPersona {
        id: 3,
        name: "Mr. Chen",
        role: "Veteran teacher (15 years)",
        personality: "Enthusiastic, talkative, unaware of impact",
        hidden_context: "Uses talking to process ideas, doesn't realize he's dominating",
        stance: "Surprised, confused when confronted",
    },
    ScenarioPersona {
        id: 4,
        name: "Ms. Davis",
        role: "New teacher (1st year)",
        personality: "Eager to please, anxious",
        hidden_context: "Was checking on a family emergency",
        stance: "Worried about job security, embarrassed",
    },
    ScenarioPersona {
        id: 5,
        name: "Mr. Williams",
        role: "Usually excellent employee (8 years)",
        personality: "Private, struggles to ask for help",
        hidden_context: "Going through difficult divorce, hasn't disclosed",
        stance: "Trying to push through, defensive about personal life",
    },
];

pub fn find_scenario(id: i64) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}

/// Persona used when a practice request names an unknown scenario.
pub fn default_persona() -> &'static ScenarioPersona {
    &PERSONAS[0]
}

/// Resolve a persona by scenario id, falling back to [`default_persona`].
pub fn persona_for(scenario_id: Option<i64>) -> &'static ScenarioPersona {
    scenario_id
        .and_then(|id| PERSONAS.iter().find(|p| p.id == id))
        .unwrap_or_else(default_persona)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
