pub const IMAGE_ANALYSIS: &str = include_str!("../data/prompts/image_analysis.txt");
pub const VIDEO_PROMPT: &str = include_str!("../data/prompts/video_prompt.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// The template is scanned once, so substituted values are never expanded
/// again. Unknown placeholders are left as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let name = &after_open[..end];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}
