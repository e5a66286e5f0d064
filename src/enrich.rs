// src/enrich.rs
//! Derived analysis columns for the presentation layer.
//!
//! Keyword heuristics only: role bucket from the title, region from the
//! location, skills from title + description, and a yearly USD salary range
//! from whatever the source reported. Nothing here feeds back into cleaning.

use std::sync::LazyLock;

use chrono::SecondsFormat;
use regex::Regex;

use crate::core::sanitize::normalize_ws;
use crate::model::{fmt_amount, JobPosting, Salary, COLUMNS};

pub const SKILLS: &[&str] = &[
    "python", "sql", "java", "javascript", "typescript", "c++", "r",
    "machine learning", "deep learning", "nlp", "computer vision",
    "pytorch", "tensorflow", "keras", "scikit-learn", "pandas", "numpy",
    "aws", "gcp", "azure", "docker", "kubernetes",
    "react", "node", "flask", "django", "fastapi",
    "postgresql", "mysql", "mongodb", "git",
];

/// First match wins, so order is significant.
const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Data Scientist", &["data scientist", "data science"]),
    ("ML Engineer", &["machine learning engineer", "ml engineer", "applied scientist"]),
    ("Data Analyst", &["data analyst", "analytics"]),
    ("Software Engineer", &["software engineer", "backend engineer", "frontend engineer", "full stack", "full-stack"]),
    ("Data Engineer", &["data engineer", "analytics engineer"]),
    ("DevOps", &["devops", "site reliability", "sre", "platform engineer"]),
];

struct RegionKeys {
    region: &'static str,
    /// Matched case-insensitively on token boundaries.
    names: &'static [&'static str],
    /// Upper-case state codes, matched case-sensitively on token boundaries.
    codes: &'static [&'static str],
}

const REGION_KEYWORDS: &[RegionKeys] = &[
    RegionKeys {
        region: "West Coast",
        names: &["california", "washington", "oregon"],
        codes: &["CA", "WA", "OR"],
    },
    RegionKeys {
        region: "East Coast",
        names: &["new york", "new jersey", "massachusetts", "virginia", "maryland", "pennsylvania"],
        codes: &["NY", "NJ", "MA", "DC", "MD", "PA"],
    },
    RegionKeys {
        region: "Central",
        names: &["texas", "illinois", "colorado", "georgia"],
        codes: &["TX", "IL", "CO", "GA"],
    },
];

const HOURS_PER_YEAR: f64 = 2080.0;
const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const PLAUSIBLE_YEARLY: std::ops::RangeInclusive<f64> = 15_000.0..=700_000.0;

static SALARY_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(k)?").expect("salary number pattern"));

/// Columns of the enriched export: the base columns, then the derived ones.
pub const ENRICHED_COLUMNS: [&str; 17] = [
    COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4], COLUMNS[5], COLUMNS[6],
    "url",
    "scraped_at",
    "role_category",
    "region",
    "skills",
    "num_skills",
    "salary_min_usd_year",
    "salary_max_usd_year",
    "salary_mid_usd_year",
    "salary_unit_guess",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SalaryUnit {
    Year,
    Month,
    Week,
    Hour,
    Unknown,
}

impl SalaryUnit {
    pub fn label(&self) -> &'static str {
        match self {
            SalaryUnit::Year => "year",
            SalaryUnit::Month => "month",
            SalaryUnit::Week => "week",
            SalaryUnit::Hour => "hour",
            SalaryUnit::Unknown => "unknown",
        }
    }

    fn per_year(&self) -> f64 {
        match self {
            SalaryUnit::Hour => HOURS_PER_YEAR,
            SalaryUnit::Week => WEEKS_PER_YEAR,
            SalaryUnit::Month => MONTHS_PER_YEAR,
            SalaryUnit::Year | SalaryUnit::Unknown => 1.0,
        }
    }
}

/// Yearly USD bounds; both `None` when unknown or implausible.
#[derive(Clone, Debug, PartialEq)]
pub struct YearlySalary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: SalaryUnit,
}

impl YearlySalary {
    fn none(unit: SalaryUnit) -> Self { Self { min: None, max: None, unit } }

    fn checked(lo: f64, hi: f64, unit: SalaryUnit) -> Self {
        if PLAUSIBLE_YEARLY.contains(&lo) && PLAUSIBLE_YEARLY.contains(&hi) {
            Self { min: Some(lo), max: Some(hi), unit }
        } else {
            Self::none(unit)
        }
    }

    pub fn mid(&self) -> Option<f64> {
        Some((self.min? + self.max?) / 2.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enriched<'a> {
    pub posting: &'a JobPosting,
    pub role_category: &'static str,
    pub region: &'static str,
    pub skills: Vec<&'static str>,
    pub salary: YearlySalary,
}

impl Enriched<'_> {
    /// One export row in `ENRICHED_COLUMNS` order.
    pub fn to_row(&self) -> Vec<String> {
        let amount = |v: Option<f64>| v.map(fmt_amount).unwrap_or_default();
        let mut row = self.posting.to_row();
        row.extend(row![
            self.posting.url,
            self.posting.scraped_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.role_category,
            self.region,
            self.skills.join(";"),
            self.skills.len(),
            amount(self.salary.min),
            amount(self.salary.max),
            amount(self.salary.mid()),
            self.salary.unit.label(),
        ]);
        row
    }
}

pub fn enrich(p: &JobPosting) -> Enriched<'_> {
    Enriched {
        posting: p,
        role_category: categorize_role(&p.title),
        region: classify_region(&p.location),
        skills: extract_skills(&format!("{} {}", p.title, p.description)),
        salary: yearly_salary(p.salary.as_ref()),
    }
}

pub fn enrich_all(postings: &[JobPosting]) -> Vec<Enriched<'_>> {
    postings.iter().map(enrich).collect()
}

pub fn categorize_role(title: &str) -> &'static str {
    let t = title.to_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(_, keys)| keys.iter().any(|k| t.contains(k)))
        .map_or("Other", |(role, _)| *role)
}

pub fn classify_region(location: &str) -> &'static str {
    let lower = location.to_lowercase();
    for keys in REGION_KEYWORDS {
        let by_name = keys.names.iter().any(|n| contains_token(&lower, n));
        let by_code = keys.codes.iter().any(|c| contains_token(location, c));
        if by_name || by_code {
            return keys.region;
        }
    }
    if lower.contains("remote") { "Remote/Unspecified" } else { "Other/Unspecified" }
}

/// Skills in canonical order. Short keywords ("r", "sql", "c++") must stand
/// alone as tokens; longer ones match anywhere.
pub fn extract_skills(text: &str) -> Vec<&'static str> {
    let t = text.to_lowercase();
    SKILLS
        .iter()
        .copied()
        .filter(|sk| if sk.len() <= 3 { contains_token(&t, sk) } else { t.contains(sk) })
        .collect()
}

/// `needle` occurs in `hay` with no ASCII letter or digit on either side.
fn contains_token(hay: &str, needle: &str) -> bool {
    hay.match_indices(needle).any(|(i, m)| {
        let before = hay[..i].chars().next_back();
        let after = hay[i + m.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}

pub fn yearly_salary(salary: Option<&Salary>) -> YearlySalary {
    match salary {
        None => YearlySalary::none(SalaryUnit::Unknown),
        Some(Salary::Range { min, max }) => YearlySalary::checked(*min, *max, SalaryUnit::Year),
        Some(Salary::Text(t)) => parse_salary_text(t),
    }
}

/// Best-effort yearly range from free text such as "$50-60/hr" or "120k - 150k".
pub fn parse_salary_text(s: &str) -> YearlySalary {
    let s0 = normalize_ws(s);
    if s0.is_empty() {
        return YearlySalary::none(SalaryUnit::Unknown);
    }
    let txt = s0.to_lowercase().replace(',', "");

    let unit = if txt.contains("/hr") || txt.contains("hour") {
        SalaryUnit::Hour
    } else if txt.contains("/month") || txt.contains("per month") {
        SalaryUnit::Month
    } else if txt.contains("/week") || txt.contains("per week") {
        SalaryUnit::Week
    } else {
        SalaryUnit::Year
    };

    let nums: Vec<f64> = SALARY_NUM
        .captures_iter(&txt)
        .filter_map(|c| {
            let v: f64 = c.get(1)?.as_str().parse().ok()?;
            Some(if c.get(2).is_some() { v * 1000.0 } else { v })
        })
        .collect();

    let (lo, hi) = match nums.as_slice() {
        [] => return YearlySalary::none(unit),
        [only] => (*only, *only),
        [a, b, ..] => (a.min(*b), a.max(*b)),
    };
    YearlySalary::checked(lo * unit.per_year(), hi * unit.per_year(), unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;

    #[test]
    fn roles_follow_keyword_order() {
        assert_eq!(categorize_role("Senior Data Scientist"), "Data Scientist");
        assert_eq!(categorize_role("Machine Learning Engineer"), "ML Engineer");
        assert_eq!(categorize_role("Backend Engineer (Rust)"), "Software Engineer");
        // "analytics" is checked before "analytics engineer"
        assert_eq!(categorize_role("Analytics Engineer"), "Data Analyst");
        assert_eq!(categorize_role("Site Reliability Engineer"), "DevOps");
        assert_eq!(categorize_role("Head of Sales"), "Other");
    }

    #[test]
    fn regions_match_names_and_codes_on_token_boundaries() {
        assert_eq!(classify_region("San Francisco, CA"), "West Coast");
        assert_eq!(classify_region("New York City"), "East Coast");
        assert_eq!(classify_region("Austin, TX"), "Central");
        assert_eq!(classify_region("Canada"), "Other/Unspecified");
        assert_eq!(classify_region("Remote - Worldwide"), "Remote/Unspecified");
        assert_eq!(classify_region("USA or Canada"), "Other/Unspecified");
    }

    #[test]
    fn skills_use_token_match_for_short_keywords() {
        let found = extract_skills("Data Engineer: Python, SQL, C++ and R; Kubernetes on AWS");
        assert_eq!(found, vec!["python", "sql", "c++", "r", "aws", "kubernetes"]);
        // no 'r' inside words, no 'git' inside 'digital'
        assert!(extract_skills("Senior digital marketer").is_empty());
        // longer keywords are plain substrings
        assert_eq!(extract_skills("nodejs"), vec!["node"]);
    }

    #[test]
    fn salary_text_units_and_bounds() {
        let y = parse_salary_text("$120,000 - $150,000");
        assert_eq!((y.min, y.max, y.unit), (Some(120_000.0), Some(150_000.0), SalaryUnit::Year));
        assert_eq!(y.mid(), Some(135_000.0));

        let h = parse_salary_text("$50-$60 per hour");
        assert_eq!((h.min, h.max, h.unit), (Some(104_000.0), Some(124_800.0), SalaryUnit::Hour));

        let k = parse_salary_text("140k - 180k");
        assert_eq!((k.min, k.max), (Some(140_000.0), Some(180_000.0)));

        let m = parse_salary_text("5000/month");
        assert_eq!((m.min, m.unit), (Some(60_000.0), SalaryUnit::Month));

        let silly = parse_salary_text("$5");
        assert_eq!((silly.min, silly.max), (None, None));
        assert_eq!(parse_salary_text("competitive").min, None);
        assert_eq!(parse_salary_text("").unit, SalaryUnit::Unknown);
    }

    #[test]
    fn numeric_ranges_are_yearly() {
        let r = Salary::Range { min: 90_000.0, max: 110_000.0 };
        let y = yearly_salary(Some(&r));
        assert_eq!((y.min, y.max, y.unit), (Some(90_000.0), Some(110_000.0), SalaryUnit::Year));
        assert_eq!(yearly_salary(None).unit, SalaryUnit::Unknown);
    }

    #[test]
    fn enriched_row_lines_up_with_columns() {
        let mut p = JobPosting::new(SourceKind::Remotive);
        p.title = s!("ML Engineer");
        p.company = s!("Neural Co");
        p.location = s!("Remote");
        p.description = s!("PyTorch and Docker");
        p.salary = Some(Salary::Text(s!("$140k - $180k")));
        let e = enrich(&p);
        let row = e.to_row();
        assert_eq!(row.len(), ENRICHED_COLUMNS.len());
        let col = |name: &str| &row[ENRICHED_COLUMNS.iter().position(|c| *c == name).unwrap()];
        assert_eq!(col("role_category"), "ML Engineer");
        assert_eq!(col("region"), "Remote/Unspecified");
        assert_eq!(col("skills"), "pytorch;docker");
        assert_eq!(col("num_skills"), "2");
        assert_eq!(col("salary_mid_usd_year"), "160000");
        assert_eq!(col("salary_unit_guess"), "year");
    }
}
