//! Splits streamed Markdown into idea cards.

/// One idea, headed by its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaCard {
    pub title: String,
    /// Full Markdown of the card, heading included.
    pub body: String,
}

/// Splits `markdown` on the shallowest ATX heading level it contains.
///
/// Text before the first such heading (usually a preamble) is dropped. Lines
/// inside fenced code blocks never count as headings.
pub fn split_cards(markdown: &str) -> Vec<IdeaCard> {
    let levels = heading_levels(markdown);
    let Some(level) = levels.iter().flatten().copied().min() else {
        return Vec::new();
    };

    let mut cards = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for (line, line_level) in markdown.lines().zip(levels) {
        if line_level == Some(level) {
            if let Some((title, lines)) = current.take() {
                cards.push(finish_card(title, &lines));
            }
            current = Some((clean_title(&line.trim_start()[level..]), vec![line]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some((title, lines)) = current {
        cards.push(finish_card(title, &lines));
    }

    cards
}

fn finish_card(title: String, lines: &[&str]) -> IdeaCard {
    IdeaCard {
        title,
        body: lines.join("\n").trim_end().to_string(),
    }
}

/// Heading level of every line, `None` for body text and fenced lines.
fn heading_levels(markdown: &str) -> Vec<Option<usize>> {
    let mut fence: Option<&str> = None;
    markdown
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let marker = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m));
            match (fence, marker) {
                (Some(open), Some(m)) if open == m => {
                    fence = None;
                    None
                }
                (Some(_), _) => None,
                (None, Some(m)) => {
                    fence = Some(m);
                    None
                }
                (None, None) => heading_level(line),
            }
        })
        .collect()
}

fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    let rest = &trimmed[level..];
    ((1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' '))).then_some(level)
}

/// Strips emphasis markers, numbering and a leading "Project N:" label from a heading.
fn clean_title(raw: &str) -> String {
    let title = raw.trim().trim_end_matches('#').replace("**", "").replace('*', "");
    let title = title.trim();

    let title = title
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches(['.', ')', ':'])
        .trim_start();
    let title = title
        .strip_prefix("Project ")
        .map(str::trim_start)
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .map(|rest| {
            rest.trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start()
                .trim_start_matches([':', '.', '-'])
                .trim_start()
        })
        .filter(|rest| !rest.is_empty())
        .unwrap_or(title);

    title.to_string()
}
