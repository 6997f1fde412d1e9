use std::fmt;

use crate::models::{RawSeverityText, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityCategory {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Critical,
    Warning,
    Normal,
}

impl SeverityCategory {
    pub fn rank(self) -> u8 {
        match self {
            SeverityCategory::High => 3,
            SeverityCategory::Medium => 2,
            SeverityCategory::Low => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityCategory::High => "HIGH",
            SeverityCategory::Medium => "MEDIUM",
            SeverityCategory::Low => "LOW",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            SeverityCategory::High => Tone::Critical,
            SeverityCategory::Medium => Tone::Warning,
            SeverityCategory::Low => Tone::Normal,
        }
    }

    /// Display category of a closed-set severity. Used for rendering only.
    pub fn of_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => SeverityCategory::High,
            Severity::Medium => SeverityCategory::Medium,
            Severity::Low => SeverityCategory::Low,
        }
    }
}

impl fmt::Display for SeverityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

const SEVERITY_RULES: &[(&[&str], SeverityCategory)] = &[
    (&["high", "critical"], SeverityCategory::High),
    (&["medium", "moderate"], SeverityCategory::Medium),
];

pub fn severity_category(text: &str) -> SeverityCategory {
    let text = text.to_lowercase();
    SEVERITY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, category)| *category)
        .unwrap_or(SeverityCategory::Low)
}

impl RawSeverityText {
    pub fn category(&self) -> SeverityCategory {
        severity_category(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardKind {
    Fire,
    Smoke,
    Electrical,
    Gas,
    Overheat,
    General,
}

// Fire before smoke: "Fire and Smoke Detected" is a fire.
const HAZARD_RULES: &[(&[&str], HazardKind)] = &[
    (&["fire"], HazardKind::Fire),
    (&["smoke"], HazardKind::Smoke),
    (&["electrical", "spark"], HazardKind::Electrical),
    (&["gas", "leak"], HazardKind::Gas),
    (&["overheat", "temperature"], HazardKind::Overheat),
];

impl HazardKind {
    pub fn classify(hazard_type: &str) -> Self {
        let hazard_type = hazard_type.to_lowercase();
        HAZARD_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|keyword| hazard_type.contains(keyword)))
            .map(|(_, kind)| *kind)
            .unwrap_or(HazardKind::General)
    }

    pub fn actions(self) -> &'static [&'static str] {
        match self {
            HazardKind::Fire => &[
                "Activate the nearest fire alarm pull station",
                "Evacuate all personnel from the affected zone",
                "Call emergency services",
                "Use an extinguisher only if the fire is small and contained",
                "Close doors behind you to slow the spread",
                "Gather at the muster point and account for all staff",
            ],
            HazardKind::Smoke => &[
                "Locate the source of the smoke",
                "Ventilate the area if it is safe to do so",
                "Stay low to avoid inhaling smoke",
                "Prepare to evacuate if the smoke thickens",
                "Notify the facility safety officer",
            ],
            HazardKind::Electrical => &[
                "Do not touch the equipment or any exposed wiring",
                "Cut power at the main breaker if it can be reached safely",
                "Keep personnel clear of the affected area",
                "Use a CO2 or dry-powder extinguisher, never water",
                "Contact a licensed electrician",
                "Tag out the equipment until it has been inspected",
            ],
            HazardKind::Gas => &[
                "Do not operate electrical switches or open flames",
                "Evacuate the area immediately",
                "Open windows and doors to ventilate",
                "Shut off the gas supply valve if accessible",
                "Call the gas emergency line from a safe distance",
                "Do not re-enter until responders clear the area",
            ],
            HazardKind::Overheat => &[
                "Power down the overheating equipment",
                "Check the cooling and ventilation systems",
                "Clear any obstructions around air vents",
                "Monitor temperature readings closely",
                "Schedule a maintenance inspection",
            ],
            HazardKind::General => &[
                "Assess the situation from a safe distance",
                "Alert nearby personnel",
                "Contact the facility safety officer",
                "Follow standard emergency procedures",
                "Document the incident for review",
            ],
        }
    }
}

pub fn recommended_actions(hazard_type: &str) -> &'static [&'static str] {
    HazardKind::classify(hazard_type).actions()
}
