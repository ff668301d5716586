// src/patterns.rs
//! Static pattern registries shared by every analyzer. Built once, never
//! mutated, safe to read from concurrent requests.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::segmenter::SectionKind;

/// Section header patterns in declaration order. Order breaks ties when a
/// line matches more than one pattern: first match wins.
pub static SECTION_HEADERS: Lazy<Vec<(SectionKind, Regex)>> = Lazy::new(|| {
    let table = [
        (
            SectionKind::Summary,
            r"(?i)^\s*(summary|objective|profile|about\s+me|professional\s+profile)\s*[:\-\s]*$",
        ),
        (
            SectionKind::Experience,
            r"(?i)^\s*(experience|professional\s+experience|work\s+history|employment|career\s+history|relevant\s+experience)\s*[:\-\s]*$",
        ),
        (
            SectionKind::Education,
            r"(?i)^\s*(education|academic\s+background|qualifications|academic\s+profile)\s*[:\-\s]*$",
        ),
        (
            SectionKind::Skills,
            r"(?i)^\s*(skills|technical\s+skills|core\s+competencies|proficiencies|technical\s+expertise|technologies)\s*[:\-\s]*$",
        ),
        (
            SectionKind::Projects,
            r"(?i)^\s*(projects|personal\s+projects|portfolio|key\s+projects|technical\s+projects|selected\s+projects)\s*[:\-\s]*$",
        ),
        (
            SectionKind::Awards,
            r"(?i)^\s*(awards|honors|recognitions|achievements)\s*[:\-\s]*$",
        ),
        (
            SectionKind::Publications,
            r"(?i)^\s*(publications|presentations)\s*[:\-\s]*$",
        ),
        (SectionKind::References, r"(?i)^\s*(references)\s*[:\-\s]*$"),
        (
            SectionKind::Contact,
            r"(?i)^\s*(contact|contact\s+information|personal\s+details)\s*[:\-\s]*$",
        ),
    ];
    table
        .into_iter()
        .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid section header pattern")))
        .collect()
});

/// Characters that open a bullet line.
pub const BULLET_GLYPHS: [char; 6] = ['-', '*', '•', '➢', '‣', '◦'];

/// Keywords that mark a short title-cased line as a probable job title.
pub const JOB_TITLE_KEYWORDS: [&str; 19] = [
    "engineer",
    "developer",
    "manager",
    "analyst",
    "specialist",
    "lead",
    "architect",
    "consultant",
    "director",
    "president",
    "officer",
    "intern",
    "associate",
    "coordinator",
    "designer",
    "scientist",
    "administrator",
    "executive",
    "head of",
];

/// Employment date spans: month/year, "YYYY-YYYY", "YYYY-Present".
pub static EMPLOYMENT_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec|Present|Current|To\sDate)[\w\s\.,\-–'’]*\d{4}\b|\b\d{4}\s*-\s*\d{4}\b|\b\d{4}\s*-\s*Present\b",
    )
    .expect("valid employment date pattern")
});

/// Quantifiable-result patterns, applied in order. Matches are counted per
/// pattern without cross-pattern deduplication, so a substring like "20%" in
/// "increased by 20%" contributes to both the numeric and the metric-verb
/// pattern. Known over-count, kept as-is.
pub static QUANTIFIABLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b\d{1,3}(?:,\d{3})*(?:\.\d+)?%?\b",
        r"(?i)\b\d+(?:\.\d+)?[KMBkm]\b",
        r"(?i)[\$€£]\s*\d{1,3}(?:,\d{3})*(?:\.\d+)?",
        r"(?i)\b(?:increase[sd]?|decrease[sd]?|grew|reduce[sd]?|save[sd]?|improve[sd]?|optimize[sd]?|achieve[sd]?|manage[sd]?|led|generate[sd]?|deliver[sd]?|exceed[ed]*|surpasse[sd]*)\s+(?:by\s+|to\s+|approx\.?\s+)?\d+(?:\.\d+)?%?",
        r"(?i)\b(?:over|more\s+than|under|less\s+than|approx(?:imately)?\.?|about|up\s+to|at\s+least)\s+\d+(?:\.\d+)?\b",
        r"(?i)\b\d+(?:\.\d+)?\s+(?:units|users|clients|projects|dollars|hours|transactions|downloads|features|campaigns|items|records|revenue|percent|points|members|customers|leads|bugs|tickets|deployments|releases)\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid quantifiable pattern"))
    .collect()
});

/// Degree name patterns. Each is extended with an optional "in/of <field>"
/// clause at compile time; matches of 12 or more tokens are rejected later.
pub static DEGREE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let cores = [
        r"B\.S\.?",
        r"M\.S\.?",
        r"Ph\.D\.?",
        r"Bachelor(?:'s)?\s*(?:of\s*(?:Science|Arts|Engineering|Technology|Business|Commerce|Applied\sScience))?",
        r"Master(?:'s)?\s*(?:of\s*(?:Science|Arts|Engineering|Technology|Business|Administration|Applied\sScience))?",
        r"Associate(?:'s)?",
        r"Diploma",
        r"Certificate",
        r"B\.Tech",
        r"M\.Tech",
        r"MBA",
        r"Doctorate",
        r"B\.A\.",
        r"M\.A\.",
    ];
    cores
        .into_iter()
        .map(|core| {
            let full = format!(r"(?i){}(?:\s+(?:in|of)\s+[\w\s\(\)&/-]+)?", core);
            Regex::new(&full).expect("valid degree pattern")
        })
        .collect()
});

/// Keywords a deduplicated single-token degree match must contain to survive
/// the plausibility filter.
pub const DEGREE_CORE_KEYWORDS: [&str; 12] = [
    "bachelor",
    "master",
    "associate",
    "doctorate",
    "diploma",
    "certificate",
    "b.s",
    "m.s",
    "ph.d",
    "mba",
    "b.tech",
    "m.tech",
];

pub static GPA_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:GPA|Grade\s*Point\s*Average|CGPA)\s*[:\s]*\d\.\d+")
        .expect("valid GPA pattern")
});

pub static HONORS_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Relevant\s*Coursework|Honors|Dean's\s*List|Cum\s*Laude|Scholarship|Awarded)")
        .expect("valid honors pattern")
});

/// Verbs that signal impact in a summary. Holds base forms alongside the
/// inflections that appear on real resumes so that irregular forms ("led",
/// "grew") count whether the lemmatizer resolves them or not.
pub const IMPACT_VERBS: [&str; 42] = [
    "achieve",
    "achieved",
    "lead",
    "led",
    "drive",
    "drove",
    "spearhead",
    "spearheaded",
    "transform",
    "transformed",
    "innovate",
    "innovated",
    "launch",
    "launched",
    "manage",
    "managed",
    "develop",
    "developed",
    "create",
    "created",
    "pioneer",
    "pioneered",
    "orchestrate",
    "orchestrated",
    "deliver",
    "delivered",
    "generate",
    "generated",
    "secure",
    "secured",
    "grow",
    "grew",
    "reduce",
    "reduced",
    "improve",
    "improved",
    "optimize",
    "optimized",
    "streamline",
    "streamlined",
    "establish",
    "established",
];

/// Canonical skill vocabulary. Detection always reports these spellings,
/// never the raw matched text.
pub const SKILL_VOCABULARY: [&str; 209] = [
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "C++",
    "C#",
    "Go",
    "Ruby",
    "Swift",
    "Kotlin",
    "PHP",
    "Scala",
    "Rust",
    "Perl",
    "Objective-C",
    "React",
    "React.js",
    "Angular",
    "AngularJS",
    "Vue.js",
    "Svelte",
    "HTML",
    "HTML5",
    "CSS",
    "CSS3",
    "SASS",
    "SCSS",
    "LESS",
    "jQuery",
    "Bootstrap",
    "Tailwind CSS",
    "Next.js",
    "Nuxt.js",
    "Gatsby",
    "Ember.js",
    "Redux",
    "Vuex",
    "MobX",
    "Node.js",
    "Express.js",
    "Django",
    "Flask",
    "Spring",
    "Spring Boot",
    "Ruby on Rails",
    ".NET",
    ".NET Core",
    "ASP.NET",
    "FastAPI",
    "Laravel",
    "Symfony",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "Microsoft SQL Server",
    "MongoDB",
    "NoSQL",
    "Oracle",
    "SQLite",
    "Firebase",
    "Firestore",
    "DynamoDB",
    "Redis",
    "Cassandra",
    "Elasticsearch",
    "Amazon Web Services",
    "AWS",
    "Microsoft Azure",
    "Azure",
    "Google Cloud Platform",
    "GCP",
    "Heroku",
    "DigitalOcean",
    "Linode",
    "Vercel",
    "Netlify",
    "CloudFormation",
    "ARM Templates",
    "Docker",
    "Kubernetes",
    "K8s",
    "CI/CD",
    "Jenkins",
    "GitLab CI",
    "GitHub Actions",
    "CircleCI",
    "Travis CI",
    "ArgoCD",
    "Spinnaker",
    "Terraform",
    "Ansible",
    "Chef",
    "Puppet",
    "Linux",
    "Unix",
    "Shell Scripting",
    "Bash",
    "PowerShell",
    "Windows Server",
    "Machine Learning",
    "ML",
    "Deep Learning",
    "DL",
    "Artificial Intelligence",
    "AI",
    "Natural Language Processing",
    "NLP",
    "Computer Vision",
    "CV",
    "Data Analysis",
    "Data Science",
    "Data Engineering",
    "Data Visualization",
    "Statistics",
    "Pandas",
    "NumPy",
    "SciPy",
    "Matplotlib",
    "Seaborn",
    "Scikit-learn",
    "TensorFlow",
    "PyTorch",
    "Keras",
    "Apache Spark",
    "Tableau",
    "Power BI",
    "Big Data",
    "Hadoop",
    "Spark",
    "Kafka",
    "Data Warehousing",
    "ETL",
    "Airflow",
    "Snowflake",
    "Redshift",
    "Agile",
    "Scrum",
    "Kanban",
    "JIRA",
    "Confluence",
    "Lean",
    "Six Sigma",
    "DevOps",
    "Site Reliability Engineering",
    "SRE",
    "RESTful APIs",
    "REST APIs",
    "GraphQL",
    "Microservices",
    "API Design",
    "SOAP",
    "gRPC",
    "WebSockets",
    "OAuth",
    "JWT",
    "Cybersecurity",
    "Information Security",
    "Network Security",
    "Penetration Testing",
    "Cryptography",
    "SIEM",
    "Firewalls",
    "Ethical Hacking",
    "Problem Solving",
    "Communication Skills",
    "Teamwork",
    "Collaboration",
    "Leadership",
    "Project Management",
    "Product Management",
    "Analytical Skills",
    "Critical Thinking",
    "Creativity",
    "Adaptability",
    "Time Management",
    "Customer Service",
    "Sales",
    "Marketing",
    "UI/UX Design",
    "User Experience",
    "User Interface",
    "Figma",
    "Adobe XD",
    "Sketch",
    "Git",
    "GitHub",
    "GitLab",
    "Bitbucket",
    "Webpack",
    "Vite",
    "Babel",
    "ESLint",
    "Jest",
    "Cypress",
    "Selenium",
    "Playwright",
    "Postman",
    "Swagger",
    "OpenAPI",
    "RabbitMQ",
    "Celery",
    "Nginx",
    "Apache",
    "Vault",
    "Prometheus",
    "Grafana",
    "Datadog",
    "Splunk",
    "New Relic",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_patterns_anchor_full_line() {
        let (_, experience) = &SECTION_HEADERS[1];
        assert!(experience.is_match("EXPERIENCE"));
        assert!(experience.is_match("Work History:"));
        assert!(!experience.is_match("My experience with Python"));
    }

    #[test]
    fn employment_date_variants() {
        assert!(EMPLOYMENT_DATE.is_match("2019 - 2021"));
        assert!(EMPLOYMENT_DATE.is_match("2019 - Present"));
        assert!(EMPLOYMENT_DATE.is_match("Jan 2019 - Mar 2021"));
        assert!(!EMPLOYMENT_DATE.is_match("managed a team of four"));
    }

    #[test]
    fn plain_year_is_not_quantifiable() {
        // Four-digit years must not inflate quantifiable counts.
        let numeric = &QUANTIFIABLE_PATTERNS[0];
        assert_eq!(numeric.find_iter("2019").count(), 0);
        assert_eq!(numeric.find_iter("grew revenue 20%").count(), 1);
    }

    #[test]
    fn degree_with_field_clause() {
        let text = "Bachelor of Science in Computer Science, 2018";
        let hit = DEGREE_PATTERNS
            .iter()
            .find_map(|p| p.find(text))
            .map(|m| m.as_str().trim().to_string());
        assert_eq!(
            hit.as_deref(),
            Some("Bachelor of Science in Computer Science")
        );
    }

    #[test]
    fn vocabulary_supports_missing_keyword_window() {
        // The missing-keyword list samples the first 50 entries.
        assert!(SKILL_VOCABULARY.len() >= 50);
    }
}
