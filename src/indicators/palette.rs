//! Color Palette Module
//! Five-step ordinal color scale shared by every layer.

/// Education level thresholds separating the five buckets.
pub const EDUCATION_THRESHOLDS: [f64; 4] = [1.8, 2.1, 2.4, 2.8];

/// RdYlGn, 9 classes. Used for the education legend gradient.
pub const RD_YL_GN_9: [&str; 9] = [
    "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a", "#66bd63",
    "#1a9850",
];

/// Label fragments, matched case-insensitively. Longer phrases are listed
/// under their own bucket and must be tested before the shorter word they contain.
const VERY_LOW: &[&str] = &["muito baixo", "muito baixa", "very low"];
const LOW: &[&str] = &["baixo", "baixa", "low"];
const MEDIUM: &[&str] = &["médio", "média", "medio", "media", "medium"];
const VERY_HIGH: &[&str] = &["muito alto", "muito alta", "very high"];
const HIGH: &[&str] = &["alto", "alta", "high"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBucket {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    Unknown,
}

impl ColorBucket {
    /// Classify a free-text class label ("Muito alto", "Baixo", ...).
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| label.contains(n));

        if has(VERY_LOW) {
            ColorBucket::VeryLow
        } else if has(LOW) {
            ColorBucket::Low
        } else if has(MEDIUM) {
            ColorBucket::Medium
        } else if has(VERY_HIGH) {
            ColorBucket::VeryHigh
        } else if has(HIGH) {
            ColorBucket::High
        } else {
            ColorBucket::Unknown
        }
    }

    /// Bucket for an average education level in [1, 4].
    pub fn from_education_level(level: f64) -> Self {
        let [very_low, low, medium, high] = EDUCATION_THRESHOLDS;
        if level < very_low {
            ColorBucket::VeryLow
        } else if level < low {
            ColorBucket::Low
        } else if level < medium {
            ColorBucket::Medium
        } else if level < high {
            ColorBucket::High
        } else {
            ColorBucket::VeryHigh
        }
    }

    /// Marker color name, as understood by the map's icon set.
    pub fn name(&self) -> &'static str {
        match self {
            ColorBucket::VeryLow => "darkred",
            ColorBucket::Low => "red",
            ColorBucket::Medium => "orange",
            ColorBucket::High => "lightgreen",
            ColorBucket::VeryHigh => "green",
            ColorBucket::Unknown => "gray",
        }
    }

    /// CSS color for circles and pin backgrounds.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorBucket::VeryLow => "#a23336",
            ColorBucket::Low => "#d63e2a",
            ColorBucket::Medium => "#f69730",
            ColorBucket::High => "#bbf970",
            ColorBucket::VeryHigh => "#72b026",
            ColorBucket::Unknown => "#575757",
        }
    }
}
