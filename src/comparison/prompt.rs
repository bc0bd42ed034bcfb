use super::config::JudgmentVariant;

pub const SYSTEM_PROMPT: &str = "You are a meticulous research analyst. You compare two \
project descriptions and report a structured, evidence-based assessment of how closely \
the existing project overlaps with the proposed one.";

/// Builds the user message for one comparison.
pub fn user_prompt(reference: &str, candidate: &str, variant: JudgmentVariant) -> String {
    let mut prompt = format!(
        "Compare the following two project descriptions.\n\n\
         Proposed project:\n{reference}\n\n\
         Existing project:\n{candidate}\n\n\
         Respond with a JSON object containing:\n\
         - \"summary\": one sentence summarising the existing project, its main goal and key innovation.\n\
         - \"similarity\": the significant commonalities (objectives, methods, technology, expected impact, beneficiaries).\n\
         - \"difference\": the notable distinctions (scope, techniques, novelty, geographic or demographic focus).\n\
         - \"score\": similarity as a number between 0 and 1 with two decimals, where 0 means unrelated and 1 means identical. \
         Weigh objectives above secondary aspects. Never use a percentage or a 0-100 scale.\n"
    );

    if variant.requires_confidence() {
        prompt.push_str(
            "- \"confidence\": how reliable the score is, as a number between 0 and 1 with two decimals. \
             Lower it when either description is vague, incomplete or inconsistent.\n",
        );
    }

    prompt.push_str(
        "- \"reason\": the justification for the score",
    );
    if variant.requires_confidence() {
        prompt.push_str(" and the confidence");
    }
    prompt.push_str(", citing concrete elements of both descriptions.\n\nBe objective and precise.");

    prompt
}
