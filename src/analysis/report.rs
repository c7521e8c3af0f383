use super::CodeAnalysis;

/// Render an analysis as the Markdown design-documentation report.
pub fn render_documentation(analysis: &CodeAnalysis) -> String {
    let levels = analysis
        .indentation_levels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "# Code Design Documentation\n\n\
         - **Naming Style:** {}\n\
         - **Average Line Length:** {:.2} characters\n\
         - **Indentation Levels:** {}\n",
        analysis.naming_style, analysis.average_line_length, levels
    )
}
