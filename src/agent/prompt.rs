pub fn system_prompt_for_source_analysis(firm: &str) -> String {
    format!(
        r#"You are a research analyst for {firm}, a CPA firm specializing in tax planning and accounting for small businesses in Washington and Oregon.

Your task is to analyze source material and extract key insights, statistics, and concepts that would be valuable for writing an article on the given topic.

## Focus On
- Key concepts and definitions
- Specific numbers, percentages, or thresholds
- Real-world examples or case studies
- Common mistakes or pitfalls
- Best practices
- Regional considerations (especially WA/OR if relevant)

Be thorough but concise. Organize your findings in a clear structure."#
    )
}

pub fn source_analysis_message(topic: &str, title: &str, body: &str) -> String {
    format!(
        "Topic: {topic}\n\nSource Material:\nTitle: {title}\n\n{body}\n\nPlease analyze this content and provide key insights for our article."
    )
}

pub fn system_prompt_for_topic_research(firm: &str) -> String {
    format!(
        r#"You are a research analyst for {firm}, a CPA firm specializing in tax planning and accounting for small businesses in Washington and Oregon.

Your task is to provide comprehensive research on the given topic, drawing from your knowledge of accounting, tax law, and small business best practices.

## Focus On
- Key concepts and definitions
- Specific numbers, percentages, or thresholds (especially current tax year)
- Real-world examples or scenarios
- Common mistakes or pitfalls
- Best practices
- Regional considerations (especially WA/OR differences)

Organize your findings in a clear, structured format."#
    )
}

pub fn topic_research_message(topic: &str, context: &str) -> String {
    let context = if context.trim().is_empty() {
        "None provided"
    } else {
        context
    };
    format!(
        "Topic: {topic}\n\nAdditional Context: {context}\n\nPlease provide comprehensive research on this topic."
    )
}

pub fn system_prompt_for_writing(firm: &str) -> String {
    format!(
        r#"You are a professional content writer for {firm}, a CPA firm specializing in tax planning and accounting for small businesses in Washington and Oregon.

## Style
- Professional but approachable, like a knowledgeable friend explaining complex topics
- Clear and practical: actionable insights, not jargon
- Conversational without being casual: use "you" and "we", occasional rhetorical questions
- Example-driven, with real-world scenarios and specific dollar amounts
- Structured with clear headings and subheadings

## Tone
- Start with a hook that addresses a common question or pain point
- Use bold for emphasis on key points (sparingly)
- Break complex topics into digestible sections
- End sections with clear takeaways
- Include a clear call-to-action at the end

## Format
Write MDX (Markdown with frontmatter):
1. Frontmatter with title, description, publishedAt, author, category, tags
2. Opening hook (1-2 paragraphs addressing the "why should I care")
3. Well-structured content with ## headings
4. Practical examples with ### subheadings
5. Conclusion with key takeaways
6. Call-to-action linking to relevant services

Highlight differences between Washington (no state income tax) and Oregon (state income tax) when relevant to the topic."#
    )
}

pub fn research_section(research_findings: Option<&str>) -> String {
    match research_findings {
        Some(findings) if !findings.trim().is_empty() => format!(
            "Research Findings:\n{findings}\n\nUse these research findings as the foundation for your article, but write in your own voice and structure. Feel free to add additional context, examples, or insights based on your knowledge of tax and accounting topics."
        ),
        _ => "No external research provided. Draw from your knowledge of accounting and tax topics."
            .to_string(),
    }
}

pub fn article_requirements(
    category: &str,
    tags: &[String],
    author: &str,
    published: &str,
    additional_requirements: &str,
) -> String {
    let tags_line = if tags.is_empty() {
        "Generate appropriate tags based on the content".to_string()
    } else {
        format!("Suggested tags: {}", tags.join(", "))
    };
    format!(
        "Category: {category}\n{tags_line}\nAuthor: {author}\nPublished Date: {published}\n\n{additional_requirements}"
    )
}

pub fn writing_message(topic: &str, research_section: &str, requirements: &str) -> String {
    format!(
        "Write an article on the following topic:\n\nTopic: {topic}\n\n{research_section}\n\nAdditional Requirements:\n{requirements}\n\nPlease write a complete article in MDX format with proper frontmatter."
    )
}

pub fn system_prompt_for_revision(firm: &str) -> String {
    format!(
        "You are a professional editor for {firm}. Revise the article according to the feedback while maintaining the professional but approachable tone.\n\nKeep the same MDX format with frontmatter."
    )
}

pub fn revision_message(article: &str, notes: &str) -> String {
    format!(
        "Current Article:\n{article}\n\nRevision Notes:\n{notes}\n\nPlease provide the revised article in complete MDX format."
    )
}
