use std::io::{BufRead, Write};

use crate::error::{AppError, Result};
use crate::workflow::ArticleRequest;

/// Split a comma-separated tag list, trimming entries and dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask for every request field on `output`, reading answers from `input`.
///
/// Blank answers take the defaults; a blank topic is rejected.
pub fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_category: &str,
) -> Result<ArticleRequest> {
    writeln!(output, "\nARTICLE GENERATOR - Interactive Mode\n")?;

    let topic = ask(input, output, "Article Topic (required): ")?;
    if topic.is_empty() {
        return Err(AppError::InvalidInput("Topic is required".to_string()));
    }

    let url = ask(input, output, "Research URL (optional, press Enter to skip): ")?;
    let category = ask(
        input,
        output,
        &format!("Category (default: {default_category}): "),
    )?;
    let tags = ask(input, output, "Tags (comma-separated, optional): ")?;
    let requirements = ask(input, output, "Additional requirements (optional): ")?;
    let filename = ask(
        input,
        output,
        "Custom filename (optional, press Enter to auto-generate): ",
    )?;

    let mut request = ArticleRequest::new(topic)
        .with_category(if category.is_empty() {
            default_category.to_string()
        } else {
            category
        })
        .with_tags(parse_tags(&tags))
        .with_requirements(requirements);

    if !url.is_empty() {
        request = request.with_research_url(url);
    }
    if !filename.is_empty() {
        request = request.with_output_filename(filename);
    }

    Ok(request)
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
