use clap::ValueEnum;
use std::fmt;

pub const IDEA_PROMPT_TEMPLATE: &str = "Generate {count} innovative senior design project ideas \
     for computer engineering students with these specifications:\n\
     {constraints}\n\n\
     For each project, provide:\n\
     1. **Project Title**: Clear, descriptive name\n\
     2. **Description**: 2-3 sentences explaining the concept and target problem\n\
     3. **Key Components**: List of required hardware/software components\n\
     4. **Technologies**: Specific technologies used\n\
     5. **Estimated Cost**: Breakdown of major components\n\
     6. **Timeline**: 8-month milestone timeline\n\
     7. **Market Appeal**: Target audience and value proposition\n\
     8. **Challenges**: Main technical and implementation challenges\n\
     9. **Unique Value**: What makes this project special/different\n\
     Start each project with a level-2 Markdown header (`## `) containing its title, \
     followed by bullet points.";

pub const MARKET_PROMPT_TEMPLATE: &str = "Provide a concise market analysis for the project idea below.\n\
     Cover: target customers and market size, existing competitors and alternatives, \
     differentiators, pricing or funding options, and the main adoption risks.\n\
     Use Markdown headers and bullet points.\n\n\
     Project idea:\n{idea}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => f.write_str("Beginner"),
            Self::Intermediate => f.write_str("Intermediate"),
            Self::Advanced => f.write_str("Advanced"),
        }
    }
}

/// Project constraints collected from the user.
#[derive(Debug, Clone)]
pub struct IdeaParams {
    pub budget: String,
    pub complexity: Complexity,
    /// 1 = safe/proven, 10 = cutting-edge/risky.
    pub innovation: u8,
    pub technologies: Vec<String>,
    pub problem: Option<String>,
    pub count: u8,
}

impl IdeaParams {
    fn constraints(&self) -> String {
        let budget = self.budget.trim();
        let budget = if budget.starts_with('$') {
            budget.to_string()
        } else {
            format!("${budget}")
        };

        let mut lines = vec![
            "Team: 4 students, 2 semesters (8-9 months)".to_string(),
            format!("Budget: {budget}"),
            format!("Complexity: {}", self.complexity),
            format!(
                "Innovation Level: {}/10 (1=safe/proven, 10=cutting-edge/risky)",
                self.innovation
            ),
        ];

        if let Some(problem) = self.problem.as_deref().map(str::trim)
            && !problem.is_empty()
        {
            lines.push(format!("Problem to Solve: {problem}"));
        }
        if !self.technologies.is_empty() {
            lines.push(format!(
                "Preferred Technologies: {}",
                self.technologies.join(", ")
            ));
        }

        lines.join("\n")
    }
}

/// Renders the idea-generation prompt. `template` overrides the built-in one.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_idea_prompt(params: &IdeaParams, template: Option<&str>) -> String {
    // {count} and {constraints} are placeholders for string replacement, not format arguments
    template
        .unwrap_or(IDEA_PROMPT_TEMPLATE)
        .replace("{count}", &params.count.to_string())
        .replace("{constraints}", &params.constraints())
}

/// Renders the market-analysis follow-up prompt for one idea.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_market_prompt(idea: &str, template: Option<&str>) -> String {
    template
        .unwrap_or(MARKET_PROMPT_TEMPLATE)
        .replace("{idea}", idea.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> IdeaParams {
        IdeaParams {
            budget: "500".to_string(),
            complexity: Complexity::Intermediate,
            innovation: 7,
            technologies: vec![],
            problem: None,
            count: 3,
        }
    }

    #[test]
    fn test_build_idea_prompt_basics() {
        let prompt = build_idea_prompt(&params(), None);
        assert!(prompt.starts_with("Generate 3 innovative"));
        assert!(prompt.contains("Budget: $500"));
        assert!(prompt.contains("Complexity: Intermediate"));
        assert!(prompt.contains("Innovation Level: 7/10"));
        assert!(prompt.contains("**Unique Value**"));
        assert!(!prompt.contains("Problem to Solve"));
        assert!(!prompt.contains("Preferred Technologies"));
    }

    #[test]
    fn test_build_idea_prompt_optional_lines() {
        let mut params = params();
        params.problem = Some("  Water waste in dorms ".to_string());
        params.technologies = vec!["Rust".to_string(), "LoRa".to_string()];

        let prompt = build_idea_prompt(&params, None);
        assert!(prompt.contains("Problem to Solve: Water waste in dorms\n"));
        assert!(prompt.contains("Preferred Technologies: Rust, LoRa"));
    }

    #[test]
    fn test_blank_problem_is_omitted() {
        let mut params = params();
        params.problem = Some("   ".to_string());
        assert!(!build_idea_prompt(&params, None).contains("Problem to Solve"));
    }

    #[test]
    fn test_budget_keeps_existing_dollar_sign() {
        let mut params = params();
        params.budget = "$1k-$5k".to_string();
        assert!(build_idea_prompt(&params, None).contains("Budget: $1k-$5k"));
    }

    #[test]
    fn test_custom_idea_template() {
        let prompt = build_idea_prompt(&params(), Some("Give me {count}.\n{constraints}"));
        assert!(prompt.starts_with("Give me 3.\nTeam:"));
    }

    #[test]
    fn test_build_market_prompt() {
        let prompt = build_market_prompt("\n## Smart Planter\n- sensors\n", None);
        assert!(prompt.contains("market analysis"));
        assert!(prompt.ends_with("## Smart Planter\n- sensors"));
    }

    #[test]
    fn test_templates_have_placeholders() {
        assert!(IDEA_PROMPT_TEMPLATE.contains("{count}"));
        assert!(IDEA_PROMPT_TEMPLATE.contains("{constraints}"));
        assert!(MARKET_PROMPT_TEMPLATE.contains("{idea}"));
    }
}
