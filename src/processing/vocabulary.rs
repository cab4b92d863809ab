//! Static skill vocabulary, synonym table, job presets and course catalog

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillCategory {
    Language,
    Web,
    Mobile,
    DataScience,
    DevOps,
    Database,
    Design,
    Soft,
    Custom,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 9] = [
        SkillCategory::Language,
        SkillCategory::Web,
        SkillCategory::Mobile,
        SkillCategory::DataScience,
        SkillCategory::DevOps,
        SkillCategory::Database,
        SkillCategory::Design,
        SkillCategory::Soft,
        SkillCategory::Custom,
    ];
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillCategory::Language => "Languages",
            SkillCategory::Web => "Web",
            SkillCategory::Mobile => "Mobile",
            SkillCategory::DataScience => "Data / ML",
            SkillCategory::DevOps => "DevOps / Cloud",
            SkillCategory::Database => "Databases & Practices",
            SkillCategory::Design => "Design / UX",
            SkillCategory::Soft => "Soft Skills",
            SkillCategory::Custom => "Custom",
        };
        write!(f, "{}", name)
    }
}

const LANGUAGES: &[&str] = &[
    "python", "java", "c", "c++", "c#", "go", "golang", "rust", "php", "ruby", "swift", "kotlin",
    "javascript", "typescript", "sql", "r",
];

const WEB: &[&str] = &[
    "html", "css", "sass", "less", "bootstrap", "tailwind", "jquery", "react", "react js", "reactjs",
    "next.js", "nextjs", "angular", "angular js", "vue", "vue.js", "svelte",
    "node", "node js", "node.js", "express", "nestjs", "django", "flask", "spring", "spring boot",
    "laravel", "rails", "asp.net", "asp.net core",
];

const MOBILE: &[&str] = &["android", "xml", "flutter", "dart", "ios", "xcode", "objective-c"];

const DATA_SCIENCE: &[&str] = &[
    "machine learning", "deep learning", "pytorch", "tensorflow", "keras", "scikit-learn", "nlp",
    "pandas", "numpy", "matplotlib", "tableau", "powerbi", "excel", "statistics", "data visualization",
];

const DEVOPS: &[&str] = &[
    "git", "github", "gitlab", "bitbucket", "docker", "kubernetes", "helm", "terraform",
    "aws", "azure", "gcp", "linux", "ci/cd", "cicd", "jenkins", "github actions", "gitlab ci",
    "nginx", "apache", "redis", "rabbitmq",
];

const DATABASES: &[&str] = &[
    "mysql", "postgres", "postgresql", "sqlite", "mongodb", "dynamodb", "cassandra", "elasticsearch",
    "graphql", "rest", "microservices", "testing", "unit testing", "pytest", "junit", "selenium",
];

const DESIGN: &[&str] = &["figma", "adobe xd", "ui", "ux", "wireframes", "prototyping"];

const SOFT_SKILLS: &[&str] = &[
    "teamwork", "communication", "problem solving", "critical thinking", "leadership",
    "time management", "adaptability", "creativity", "collaboration", "software engineering",
];

/// Spelling variants and the canonical skill each one stands for.
pub const SKILL_VARIATIONS: &[(&str, &str)] = &[
    ("nodejs", "node.js"),
    ("reactjs", "react"),
    ("nextjs", "next.js"),
    ("angularjs", "angular"),
    ("vuejs", "vue.js"),
    ("springboot", "spring boot"),
    ("objective c", "objective-c"),
    ("scikit learn", "scikit-learn"),
];

/// Headings whose presence signals a well-structured resume.
pub const SECTION_HINTS: &[&str] = &[
    "education", "experience", "projects", "skills", "certifications", "work experience",
];

/// Suggested when no job description is given.
pub const FOUNDATION_SKILLS: &[&str] = &[
    "git", "docker", "ci/cd", "testing", "unit testing", "sql", "linux",
    "aws", "azure", "gcp", "rest", "graphql", "mysql", "postgres", "mongodb",
];

/// Suggested by the job board when an applicant already covers every listed skill.
pub const JOB_BOARD_FALLBACK_SKILLS: &[&str] = &["git", "docker", "sql", "testing", "aws", "linux"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPreset {
    pub title: &'static str,
    pub core_skills: &'static [&'static str],
}

pub const JOB_PRESETS: &[JobPreset] = &[
    JobPreset {
        title: "Software Engineer",
        core_skills: &["python", "java", "c++", "git", "testing"],
    },
    JobPreset {
        title: "Data Scientist",
        core_skills: &["python", "r", "machine learning", "deep learning", "pandas", "numpy", "statistics"],
    },
    JobPreset {
        title: "Web Developer",
        core_skills: &["html", "css", "javascript", "react", "node", "django", "flask"],
    },
    JobPreset {
        title: "Android Developer",
        core_skills: &["android", "kotlin", "java", "xml"],
    },
    JobPreset {
        title: "iOS Developer",
        core_skills: &["ios", "swift", "xcode", "objective-c"],
    },
    JobPreset {
        title: "UI/UX Designer",
        core_skills: &["figma", "adobe xd", "ui", "ux", "prototyping"],
    },
];

impl JobPreset {
    /// Look up a preset by title, ignoring case and surrounding whitespace.
    pub fn find(job_description: &str) -> Option<&'static JobPreset> {
        let wanted = job_description.trim();
        JOB_PRESETS
            .iter()
            .find(|preset| preset.title.eq_ignore_ascii_case(wanted))
    }

    pub fn core_skill_set(&self) -> BTreeSet<String> {
        self.core_skills.iter().map(|s| s.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    DataScience,
    WebDevelopment,
    AndroidDevelopment,
    IosDevelopment,
    UiUxDesign,
    SoftwareEngineering,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::DataScience => "Data Science",
            Field::WebDevelopment => "Web Development",
            Field::AndroidDevelopment => "Android Development",
            Field::IosDevelopment => "iOS Development",
            Field::UiUxDesign => "UI/UX Design",
            Field::SoftwareEngineering => "Software Engineering",
        };
        write!(f, "{}", name)
    }
}

/// Field keyword sets, checked in order; the first intersecting field wins.
pub const FIELD_KEYWORDS: &[(Field, &[&str])] = &[
    (
        Field::DataScience,
        &["tensorflow", "keras", "pytorch", "machine learning", "deep learning", "flask", "streamlit", "python", "r", "sql"],
    ),
    (
        Field::WebDevelopment,
        &["react", "django", "node js", "node", "express", "php", "laravel", "wordpress", "javascript", "angular", "typescript", "html", "css"],
    ),
    (Field::AndroidDevelopment, &["android", "flutter", "kotlin", "xml", "kivy"]),
    (Field::IosDevelopment, &["ios", "swift", "cocoa", "xcode", "objective-c"]),
    (
        Field::UiUxDesign,
        &["ux", "figma", "adobe xd", "ui", "prototyping", "wireframes", "photoshop", "illustrator"],
    ),
];

const DATA_SCIENCE_COURSES: &[&str] = &[
    "Machine Learning Crash Course (Google)",
    "Machine Learning Specialization (Coursera)",
    "Deep Learning Specialization (Coursera)",
    "Data Science Foundations: Fundamentals (LinkedIn Learning)",
    "Applied Data Science with Python (Coursera)",
];

const WEB_COURSES: &[&str] = &[
    "Django Crash Course",
    "Python and Django Full Stack Web Developer Bootcamp (Udemy)",
    "React Crash Course",
    "Full Stack Web Developer - MEAN Stack",
    "Node.js and Express.js Fundamentals",
];

const ANDROID_COURSES: &[&str] = &[
    "Android Development for Beginners",
    "Android App Development Specialization (Coursera)",
    "Associate Android Developer Certification",
    "Flutter & Dart - The Complete Guide (Udemy)",
    "Kotlin for Android Developers",
];

const IOS_COURSES: &[&str] = &[
    "iOS App Development (LinkedIn Learning)",
    "iOS & Swift - The Complete iOS App Development Bootcamp (Udemy)",
    "Become an iOS Developer (Udacity)",
    "iOS App Development with Swift Specialization (Coursera)",
    "Mobile App Development with Swift (edX)",
];

const UIUX_COURSES: &[&str] = &[
    "Google UX Design Professional Certificate (Coursera)",
    "UI / UX Design Specialization (Coursera)",
    "The Complete App Design Course - UX, UI and Design Thinking (Udemy)",
    "UX & Web Design Master Course: Strategy, Design, Development (Udemy)",
    "Adobe XD Tutorial: User Experience Design",
];

impl Field {
    pub fn courses(&self) -> &'static [&'static str] {
        match self {
            Field::DataScience => DATA_SCIENCE_COURSES,
            // software engineering falls back to the web track
            Field::WebDevelopment | Field::SoftwareEngineering => WEB_COURSES,
            Field::AndroidDevelopment => ANDROID_COURSES,
            Field::IosDevelopment => IOS_COURSES,
            Field::UiUxDesign => UIUX_COURSES,
        }
    }
}

/// One searchable term and the canonical skill it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyTerm {
    pub pattern: String,
    pub canonical: String,
    pub category: SkillCategory,
}

/// The full set of searchable skill terms.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<VocabularyTerm>,
    categories: HashMap<String, SkillCategory>,
    variations: HashMap<String, String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::with_extra_skills(&[])
    }
}

impl SkillVocabulary {
    pub fn with_extra_skills(extra_skills: &[String]) -> Self {
        let groups: [(SkillCategory, &[&str]); 8] = [
            (SkillCategory::Language, LANGUAGES),
            (SkillCategory::Web, WEB),
            (SkillCategory::Mobile, MOBILE),
            (SkillCategory::DataScience, DATA_SCIENCE),
            (SkillCategory::DevOps, DEVOPS),
            (SkillCategory::Database, DATABASES),
            (SkillCategory::Design, DESIGN),
            (SkillCategory::Soft, SOFT_SKILLS),
        ];

        let mut categories = HashMap::new();
        for (category, skills) in groups {
            for skill in skills {
                categories.entry(skill.to_string()).or_insert(category);
            }
        }
        for skill in extra_skills {
            let skill = skill.trim().to_lowercase();
            if !skill.is_empty() {
                categories.entry(skill).or_insert(SkillCategory::Custom);
            }
        }

        let variations: HashMap<String, String> = SKILL_VARIATIONS
            .iter()
            .map(|(variant, canonical)| (variant.to_string(), canonical.to_string()))
            .collect();

        let mut terms: Vec<VocabularyTerm> = categories
            .iter()
            .map(|(skill, category)| VocabularyTerm {
                pattern: skill.clone(),
                canonical: skill.clone(),
                category: *category,
            })
            .collect();

        for (variant, canonical) in &variations {
            let category = categories
                .get(canonical)
                .copied()
                .unwrap_or(SkillCategory::Custom);
            terms.push(VocabularyTerm {
                pattern: variant.clone(),
                canonical: canonical.clone(),
                category,
            });
        }

        terms.sort_by(|a, b| a.pattern.cmp(&b.pattern).then_with(|| a.canonical.cmp(&b.canonical)));

        Self {
            terms,
            categories,
            variations,
        }
    }

    pub fn terms(&self) -> &[VocabularyTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Lower-case, trim and map a spelling variant onto its canonical skill.
    pub fn canonicalize(&self, term: &str) -> String {
        let lowered = term.trim().to_lowercase();
        self.variations.get(&lowered).cloned().unwrap_or(lowered)
    }

    pub fn category_of(&self, skill: &str) -> Option<SkillCategory> {
        self.categories.get(&self.canonicalize(skill)).copied()
    }

    pub fn is_known(&self, skill: &str) -> bool {
        self.category_of(skill).is_some()
    }
}
