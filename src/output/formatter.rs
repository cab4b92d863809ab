//! Output formatters for console, JSON and markdown

use crate::config::{OutputConfig, OutputFormat, ScoringConfig};
use crate::error::Result;
use crate::output::report::{CandidateListing, JobResults, JobSummary};
use crate::processing::resume_parser::UNKNOWN;
use crate::processing::scoring::UserLevel;
use crate::processing::ScreeningReport;
use crate::store::AnalysisRecord;
use colored::{Color, Colorize};
use std::path::Path;

/// Renders every report the CLI produces.
pub trait OutputFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String>;
    fn format_candidates(&self, listing: &CandidateListing) -> Result<String>;
    fn format_results(&self, results: &JobResults) -> Result<String>;
    fn format_jobs(&self, jobs: &[JobSummary]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    /// Level thresholds for stored analyses, which carry no level of their own
    scoring: ScoringConfig,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn verdict(level: UserLevel) -> &'static str {
    match level {
        UserLevel::Advanced => "Strong candidate, ready for senior-leaning roles",
        UserLevel::Intermediate => "Solid profile with a few gaps to close",
        UserLevel::Beginner => "Early-stage profile, focus on the recommended skills",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            scoring: ScoringConfig::default(),
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_level_badge(&self, level: UserLevel) -> String {
        let (badge, color) = match level {
            UserLevel::Advanced => ("ADVANCED", Color::Green),
            UserLevel::Intermediate => ("INTERMEDIATE", Color::Yellow),
            UserLevel::Beginner => ("BEGINNER", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_analysis_line(&self, record: &AnalysisRecord) -> String {
        format!(
            "#{:<5} student {:<6} {:>3}/100 {} {:>5.1}% match  missing: {}\n",
            record.application_id,
            record.student_id,
            record.score,
            self.format_level_badge(UserLevel::from_score(record.score, &self.scoring)),
            record.analysis.match_percentage,
            join_or_none(&record.analysis.missing_skills),
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let profile = &report.profile;

        output.push_str(&self.format_header("RESUME SCREENING", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));
        if !report.resume_path.is_empty() {
            output.push_str(&format!("Resume: {}\n", report.resume_path));
        }

        output.push_str(&self.format_header("Candidate", 2));
        output.push_str(&format!("Name:   {}\n", profile.name));
        output.push_str(&format!("Email:  {}\n", profile.email));
        output.push_str(&format!("Mobile: {}\n", profile.mobile));
        output.push_str(&format!("Pages:  {}\n", profile.pages));

        output.push_str(&self.format_header("Score", 2));
        output.push_str(&format!(
            "Resume Score: {}/100 {}\n",
            report.score.total,
            self.format_level_badge(report.level)
        ));
        output.push_str(&format!("Level: {}\n", self.colorize(&report.level.to_string(), Color::Cyan)));
        output.push_str(&format!("Verdict: {}\n", verdict(report.level)));

        match &report.job_description {
            Some(jd) => {
                let preset = report
                    .job_skills
                    .preset
                    .as_deref()
                    .map(|title| format!(" (preset: {})", title))
                    .unwrap_or_default();
                output.push_str(&format!("Job: {}{}\n", jd, preset));
            }
            None => output.push_str("Job: none given, scored on skill count\n"),
        }

        if self.detailed {
            output.push_str(&self.format_header("Score Breakdown", 3));
            output.push_str(&format!(
                "Job match:  {:.1} (core {}/{}, other {}/{})\n",
                report.score.job_points,
                report.score.matched_core,
                report.job_skills.core.len(),
                report.score.matched_other,
                report.job_skills.other.len()
            ));
            output.push_str(&format!(
                "Structure:  {:.1} ({} section headings)\n",
                report.score.structure_points, report.score.section_hits
            ));
            output.push_str(&format!("Breadth:    {:.1}\n", report.score.breadth_points));
        }

        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&format!(
            "Found ({}): {}\n",
            profile.skills.len(),
            self.colorize(&join_or_none(&profile.skills), Color::Green)
        ));
        output.push_str(&format!(
            "Recommended: {}\n",
            self.colorize(&join_or_none(&report.recommended_skills), Color::Yellow)
        ));

        output.push_str(&self.format_header(&format!("Courses for {}", report.courses.field), 2));
        let course_limit = if self.detailed { report.courses.courses.len() } else { 5 };
        for course in report.courses.courses.iter().take(course_limit) {
            output.push_str(&format!("  - {}\n", course));
        }

        Ok(output)
    }

    fn format_candidates(&self, listing: &CandidateListing) -> Result<String> {
        let mut output = String::new();

        let title = match &listing.job_filter {
            Some(job) => format!("CANDIDATES FOR {}", job.to_uppercase()),
            None => "CANDIDATES".to_string(),
        };
        output.push_str(&self.format_header(&title, 1));

        if listing.candidates.is_empty() {
            output.push_str("No candidates stored yet.\n");
            return Ok(output);
        }

        for (rank, candidate) in listing.candidates.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:<24} {:>3}/100 {} {}\n",
                rank + 1,
                candidate.name,
                candidate.score,
                self.format_level_badge(candidate.user_level),
                self.colorize(&candidate.predicted_field.to_string(), Color::Cyan)
            ));

            if self.detailed {
                if candidate.email != UNKNOWN {
                    output.push_str(&format!("     {}\n", candidate.email));
                }
                output.push_str(&format!("     skills: {}\n", join_or_none(&candidate.skills)));
                output.push_str(&format!(
                    "     screened {}\n",
                    candidate.timestamp.format("%Y-%m-%d %H:%M")
                ));
            }
        }

        Ok(output)
    }

    fn format_results(&self, results: &JobResults) -> Result<String> {
        let mut output = String::new();

        let title = match &results.job_title {
            Some(title) => format!("ANALYZED APPLICATIONS: {} (job {})", title, results.job_id),
            None => format!("ANALYZED APPLICATIONS: job {}", results.job_id),
        };
        output.push_str(&self.format_header(&title, 1));

        if results.results.is_empty() {
            output.push_str("No analyzed applications for this job.\n");
            return Ok(output);
        }

        for record in &results.results {
            output.push_str(&self.format_analysis_line(record));

            if self.detailed {
                output.push_str(&format!(
                    "       matched: {}\n",
                    self.colorize(&join_or_none(&record.analysis.matched_skills), Color::Green)
                ));
                for (category, coverage) in &record.analysis.skills_breakdown {
                    output.push_str(&format!(
                        "       {}: {}/{}\n",
                        category, coverage.matched, coverage.required
                    ));
                }
                for recommendation in &record.analysis.recommendations {
                    output.push_str(&format!("       [+] {}\n", recommendation));
                }
            }
        }

        Ok(output)
    }

    fn format_jobs(&self, jobs: &[JobSummary]) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header("JOB POSTINGS", 1));

        if jobs.is_empty() {
            output.push_str("The board has no postings.\n");
            return Ok(output);
        }

        for job in jobs {
            let status = if job.is_active {
                self.colorize("active", Color::Green)
            } else {
                self.colorize("closed", Color::Red)
            };
            output.push_str(&format!(
                "{:>4}  {} @ {} [{}] {}\n",
                job.id, job.title, job.company, job.job_type, status
            ));
            output.push_str(&format!(
                "      {} applications, {} analyzed | skills: {}\n",
                job.applications,
                job.analyzed,
                join_or_none(&job.skills)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String> {
        self.render(report)
    }

    fn format_candidates(&self, listing: &CandidateListing) -> Result<String> {
        self.render(listing)
    }

    fn format_results(&self, results: &JobResults) -> Result<String> {
        self.render(results)
    }

    fn format_jobs(&self, jobs: &[JobSummary]) -> Result<String> {
        self.render(jobs)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let profile = &report.profile;

        output.push_str(&format!("# Resume Screening: {}\n\n", profile.name));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms
            ));
            if let Some(file_name) = Path::new(&report.resume_path).file_name() {
                output.push_str(&format!("**Resume:** `{}`\n", file_name.to_string_lossy()));
            }
            output.push('\n');
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Resume Score:** {}/100\n\n", report.score.total));
        output.push_str(&format!("**Level:** {} ({})\n\n", report.level, verdict(report.level)));
        if let Some(jd) = &report.job_description {
            output.push_str(&format!("**Job:** {}\n\n", jd));
        }

        output.push_str("| Component | Points |\n");
        output.push_str("|-----------|--------|\n");
        output.push_str(&format!("| Job match | {:.1} |\n", report.score.job_points));
        output.push_str(&format!("| Structure | {:.1} |\n", report.score.structure_points));
        output.push_str(&format!("| Skill breadth | {:.1} |\n\n", report.score.breadth_points));

        output.push_str("## Contact\n\n");
        output.push_str(&format!("- Email: {}\n", profile.email));
        output.push_str(&format!("- Mobile: {}\n", profile.mobile));
        output.push_str(&format!("- Pages: {}\n\n", profile.pages));

        output.push_str("## Skills\n\n");
        output.push_str(&format!("**Found:** {}\n\n", join_or_none(&profile.skills)));
        output.push_str(&format!("**Recommended:** {}\n\n", join_or_none(&report.recommended_skills)));

        output.push_str(&format!("## Courses for {}\n\n", report.courses.field));
        for course in &report.courses.courses {
            output.push_str(&format!("- {}\n", course));
        }

        Ok(output)
    }

    fn format_candidates(&self, listing: &CandidateListing) -> Result<String> {
        let mut output = String::new();

        match &listing.job_filter {
            Some(job) => output.push_str(&format!("# Candidates for {}\n\n", job)),
            None => output.push_str("# Candidates\n\n"),
        }

        output.push_str("| Rank | Name | Email | Score | Level | Field | Screened |\n");
        output.push_str("|------|------|-------|-------|-------|-------|----------|\n");
        for (rank, candidate) in listing.candidates.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                rank + 1,
                Self::escape_cell(&candidate.name),
                Self::escape_cell(&candidate.email),
                candidate.score,
                candidate.user_level,
                candidate.predicted_field,
                candidate.timestamp.format("%Y-%m-%d")
            ));
        }

        Ok(output)
    }

    fn format_results(&self, results: &JobResults) -> Result<String> {
        let mut output = String::new();

        match &results.job_title {
            Some(title) => output.push_str(&format!("# {} (job {})\n\n", title, results.job_id)),
            None => output.push_str(&format!("# Job {}\n\n", results.job_id)),
        }

        output.push_str("| Application | Student | Score | Match | Missing skills |\n");
        output.push_str("|-------------|---------|-------|-------|----------------|\n");
        for record in &results.results {
            output.push_str(&format!(
                "| {} | {} | {} | {:.1}% | {} |\n",
                record.application_id,
                record.student_id,
                record.score,
                record.analysis.match_percentage,
                Self::escape_cell(&join_or_none(&record.analysis.missing_skills))
            ));
        }

        if self.include_metadata {
            for record in &results.results {
                if record.analysis.recommendations.is_empty() {
                    continue;
                }
                output.push_str(&format!("\n### Application {}\n\n", record.application_id));
                for recommendation in &record.analysis.recommendations {
                    output.push_str(&format!("- {}\n", recommendation));
                }
            }
        }

        Ok(output)
    }

    fn format_jobs(&self, jobs: &[JobSummary]) -> Result<String> {
        let mut output = String::from("# Job Postings\n\n");
        output.push_str("| Id | Title | Company | Type | Active | Applications | Analyzed |\n");
        output.push_str("|----|-------|---------|------|--------|--------------|----------|\n");
        for job in jobs {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                job.id,
                Self::escape_cell(&job.title),
                Self::escape_cell(&job.company),
                job.job_type,
                if job.is_active { "yes" } else { "no" },
                job.applications,
                job.analyzed
            ));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed)
    }

    /// Use the configured level thresholds for badges computed from stored scores.
    pub fn with_scoring(mut self, scoring: &ScoringConfig) -> Self {
        self.console_formatter = self.console_formatter.with_scoring(scoring.clone());
        self
    }

    pub fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_screening{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_screening{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_screening{}.md", base_name, timestamp_suffix),
    }
}
