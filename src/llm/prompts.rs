//! Prompt assembly for ruling generation
//!
//! Every generated ruling shares one skeleton: the question, the assembled
//! rules context, and an explicit exception checklist. The intent adds a
//! focus block steering the model toward the right family of distinctions.

use crate::corpus::CLUB_NAME;
use crate::models::Intent;

/// Focus block contributed by the classified intent
fn intent_focus(intent: Intent) -> &'static str {
    match intent {
        Intent::Position => {
            "Focus on:\n\
             - Local boundary definitions (purple line, train tracks, construction areas, out of bounds markers)\n\
             - Ball location determination (in bounds vs out of bounds, penalty area vs general area)\n\
             - Course area identification (teeing area, bunker, penalty area, putting green, general area)\n\
             - Playability status (can the ball be played, is it the right ball)\n\
             Ball position is not relief procedure: answer WHERE the ball stands, not how to take relief."
        }
        Intent::Relief => {
            "Focus on:\n\
             - Local relief options (special procedures, dropping zones, free vs penalty relief)\n\
             - Local rule exceptions (integral objects, no-relief areas, boundary definitions)\n\
             - Relief procedures (where to drop, how many penalty strokes, measurement)\n\
             - Local relief always takes precedence over the general option when both apply."
        }
        Intent::Penalty => {
            "Focus on:\n\
             - Whether a penalty applies at all (many accidental acts are penalty-free)\n\
             - Who gets the penalty and how many strokes\n\
             - Accidental versus deliberate actions, and who caused the condition."
        }
        Intent::Procedure => {
            "Focus on:\n\
             - The exact order of steps the player must follow\n\
             - Marking, lifting, cleaning, replacing, and dropping mechanics\n\
             - What makes a drop or replacement valid, and what to do when it is not."
        }
        Intent::Other => {
            "Determine whether this is about ball position, relief procedures, penalties, or \
             rule clarification, then answer with local rule priority."
        }
    }
}

/// Build the generation prompt for a classified question
pub fn ruling_prompt(intent: Intent, question: &str, context: &str) -> String {
    format!(
        "You are an expert golf rules official at {club} with complete knowledge of both the \
         official Rules of Golf and the club's local rules.\n\
         \n\
         QUESTION: {question}\n\
         \n\
         RELEVANT RULES CONTEXT:\n\
         {context}\n\
         \n\
         {focus}\n\
         \n\
         CRITICAL INSTRUCTIONS FOR ACCURATE RULINGS:\n\
         \n\
         1. IDENTIFY THE PRIMARY RULE that applies to this situation.\n\
         \n\
         2. CHECK FOR EXCEPTIONS - this is where rulings go wrong. Consider:\n\
            - WHO caused the condition: another person (Rule 8.1d may allow restoring \
         conditions), natural forces (Rules 9.3, 9.6), or the player accidentally (Rule 9.4)\n\
            - WHEN it happened: after the ball came to rest, during the stroke, while the \
         ball was in motion (Rules 11.1-11.3), or after marking and lifting (Rule 14.2d)\n\
            - WHERE on the course: putting green (Rule 13), penalty area (Rule 17), bunker \
         (Rule 12), teeing area (Rule 6)\n\
            - INTENT: accidental movement often carries no penalty; deliberate actions \
         usually do\n\
            - Read every condition labeled as an exception before concluding something is \
         not allowed.\n\
         \n\
         3. CHECK THE CLUB'S LOCAL RULES: a local rule that applies to this situation takes \
         precedence. Local rules are marked with the CCC- prefix in the context.\n\
         \n\
         4. PROVIDE YOUR ANSWER:\n\
            - State the applicable rule(s) with rule numbers\n\
            - Mention any exception that applies and how it changes the ruling\n\
            - Give the procedure step by step\n\
            - State the penalty, or say explicitly that there is none\n\
         \n\
         RESPONSE FORMAT:\n\
         - Start with the direct ruling (1-2 sentences), then the explanation with citations\n\
         - Keep the total response to 150-250 words\n\
         - Do not explore rules that do not apply\n\
         - Begin with \"According to the club's local rules...\" when a local rule governs, \
         or \"According to the Rules of Golf, Rule X.X...\" otherwise.\n\
         \n\
         Now provide your complete ruling:",
        club = CLUB_NAME,
        question = question,
        context = context,
        focus = intent_focus(intent),
    )
}

/// Multiple-choice prompt for intent classification
pub fn intent_prompt(question: &str) -> String {
    format!(
        "Golf question type?\n\
         A) Ball location/position (where is the ball, can it be played, is it in bounds)\n\
         B) Relief options/procedures (what are my options, how do I get relief)\n\
         C) Penalty question (how many strokes, who is penalized)\n\
         D) Procedure question (how to mark, drop, replace, or proceed step by step)\n\
         E) Other\n\
         \n\
         Question: {question}\n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_question_and_context() {
        let prompt = ruling_prompt(Intent::Relief, "water on 16?", "Rule 17.1: options");
        assert!(prompt.contains("QUESTION: water on 16?"));
        assert!(prompt.contains("Rule 17.1: options"));
        assert!(prompt.contains(CLUB_NAME));
    }

    #[test]
    fn test_focus_blocks_differ_by_intent() {
        let position = ruling_prompt(Intent::Position, "q", "c");
        let relief = ruling_prompt(Intent::Relief, "q", "c");
        assert_ne!(position, relief);
        assert!(position.contains("Ball position is not relief procedure"));
        assert!(relief.contains("dropping zones"));
    }

    #[test]
    fn test_intent_prompt_lists_five_options() {
        let prompt = intent_prompt("lost my ball");
        for option in ["A)", "B)", "C)", "D)", "E)"] {
            assert!(prompt.contains(option));
        }
    }
}
