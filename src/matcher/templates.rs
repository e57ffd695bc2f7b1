//! Built-in canned-answer template library
//!
//! Declarative records only: trigger phrases, critical concepts, vetoes and
//! boosts all live in data so each template can be tuned and tested without
//! touching the matcher's control flow.

use crate::models::TemplateRecord;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    triggers: &[&str],
    critical_concepts: &[&str],
    min_concept_matches: usize,
    veto_phrases: &[&str],
    boost_phrases: &[&str],
    rule_id: Option<&str>,
    answer: &str,
) -> TemplateRecord {
    TemplateRecord {
        id: id.to_string(),
        triggers: strings(triggers),
        critical_concepts: strings(critical_concepts),
        min_concept_matches,
        veto_phrases: strings(veto_phrases),
        boost_phrases: strings(boost_phrases),
        answer: answer.to_string(),
        rule_id: rule_id.map(str::to_string),
    }
}

/// The built-in template set, in precedence order (first wins ties)
pub fn builtin_templates() -> Vec<TemplateRecord> {
    vec![
        template(
            "clear_lost_ball",
            &[
                "lost my ball in the woods",
                "lost my ball in the rough",
                "lost ball in trees",
                "lost ball in the fescue",
                "cannot find my ball",
                "can't find my ball",
            ],
            &["lost", "ball", "woods", "rough", "trees", "fescue", "find"],
            2,
            // A lost ball near water is a penalty-area question, not this template
            &["hazard", "pond", "penalty_area", "penalty area", "red stakes", "yellow stakes"],
            &[],
            Some("CCC-1"),
            "At Columbia Country Club you have TWO options for a lost ball:\n\
             \n\
             OPTION 1 - Club special relief (2 penalty strokes):\n\
             - Estimate where your ball was lost\n\
             - Find the nearest fairway point to that spot, no closer to the hole\n\
             - Drop within two club-lengths of the lines from the hole through each point\n\
             \n\
             OPTION 2 - Standard rule (1 penalty stroke):\n\
             Return to where you last played and hit again (stroke and distance).\n\
             \n\
             Most golfers prefer the club option since you don't have to walk back.",
        ),
        template(
            "clear_out_of_bounds",
            &["out of bounds", "over the fence", "ob"],
            &["out_of_bounds", "fence", "boundary", "white_stakes"],
            2,
            &[],
            // Boundary-stake language makes this reading more certain
            &["white stakes", "white line", "boundary stakes", "boundary line"],
            Some("CCC-1"),
            "At Columbia Country Club you have TWO options for an out-of-bounds ball:\n\
             \n\
             OPTION 1 - Club special relief (2 penalty strokes):\n\
             - Estimate where your ball crossed out of bounds\n\
             - Find the nearest fairway point to that spot, no closer to the hole\n\
             - Drop within two club-lengths of the lines from the hole through each point\n\
             \n\
             OPTION 2 - Standard rule (1 penalty stroke):\n\
             Return to where you last played and hit again (stroke and distance).\n\
             \n\
             Exception: free relief applies to a ball hit into the maintenance area left of \
             #10, whether the ball is found or not.",
        ),
        template(
            "water_hazard_16",
            &[
                "water on 16",
                "water on #16",
                "water on hole 16",
                "water on the 16th",
                "water hazard on 16",
                "penalty area on 16",
            ],
            &["16", "water", "penalty_area", "hazard", "pond", "creek"],
            2,
            &[],
            &[],
            Some("CCC-2"),
            "On the 16th hole your options under Rule 17.1 depend on where the ball entered \
             the water:\n\
             \n\
             South side of the footbridge (yellow stakes):\n\
             - Stroke-and-distance relief (1 penalty stroke)\n\
             - Back-on-the-line relief (1 penalty stroke), OR\n\
             - The DROPPING ZONE near the 16th green (1 penalty stroke)\n\
             \n\
             North side of the footbridge (red stakes): additionally, drop within two \
             club-lengths of where the ball crossed into the penalty area, no closer to the \
             hole (1 penalty stroke).",
        ),
        template(
            "water_hazard_17",
            &[
                "water on 17",
                "water on #17",
                "water on hole 17",
                "water on the 17th",
                "water on seventeen",
                "pond on 17",
                "drop zone on seventeen",
            ],
            &["17", "water", "penalty_area", "hazard", "pond", "drop_zone"],
            2,
            &[],
            &[],
            Some("CCC-2"),
            "On the 17th hole:\n\
             \n\
             Ball in the POND (west of the footbridge):\n\
             - Standard relief under Rule 17.1 (1 penalty stroke), OR\n\
             - The DROPPING ZONE near the 17th green (1 penalty stroke)\n\
             \n\
             Ball in any other penalty area on 17, including on the cart bridge:\n\
             - Standard relief under Rule 17.1 only\n\
             \n\
             The dropping zone serves only the main pond, not the other water on the hole.",
        ),
        template(
            "turf_nursery",
            &["turf nursery", "turf farm", "sod farm", "grass farm", "ball in the nursery"],
            &["turf_nursery", "nursery", "sod_farm", "turf", "farm"],
            1,
            &[],
            &[],
            Some("CCC-8"),
            "The turf nursery adjacent to the maintenance area is a No Play Zone.\n\
             \n\
             MANDATORY free relief is required:\n\
             - You CANNOT play the ball as it lies\n\
             - You MUST take free relief under Rule 16.1f\n\
             - Drop at the nearest point of complete relief, within one club-length, no \
             closer to the hole, no penalty\n\
             \n\
             Unlike regular ground under repair, relief here is mandatory, not optional.",
        ),
        template(
            "maintenance_facility",
            &[
                "maintenance facility",
                "maintenance building",
                "maintenance shed",
                "maintenance area",
                "maintenance road",
            ],
            &["maintenance", "facility", "building", "shed", "equipment"],
            2,
            &[],
            &[],
            Some("CCC-7"),
            "The maintenance facility near holes 9 and 10 gives FREE RELIEF from:\n\
             - All maintenance buildings, storage tanks and sheds\n\
             - Paved and gravel areas\n\
             - Retention ponds and parked equipment\n\
             \n\
             The entire complex is one large immovable obstruction. Drop within one \
             club-length of your nearest point of complete relief, no closer to the hole.",
        ),
        template(
            "ob_lines",
            &[
                "on the out of bounds line",
                "touching the out of bounds line",
                "on the white line",
                "touching the white line",
                "touching the white paint",
                "painted boundary line",
            ],
            &["white_line", "out_of_bounds", "boundary", "touching", "painted"],
            2,
            &[],
            &[],
            None,
            "When out of bounds is defined by a painted line on the ground, the boundary \
             edge is the course-side edge of the line, and the line itself is out of bounds.\n\
             \n\
             When stakes define the boundary, they are boundary objects and are treated as \
             immovable even if they can be moved.",
        ),
        template(
            "aeration_holes",
            &["aeration", "punched green", "aerify"],
            &["aeration", "aerify", "punched"],
            1,
            &[],
            &[],
            Some("CCC-11"),
            "Aeration holes at Columbia Country Club:\n\
             \n\
             FREE RELIEF when the ball is in or touches an aeration hole, or one interferes \
             with your swing.\n\
             NO RELIEF when the hole only affects your stance, or on the putting green only \
             your line of putt.\n\
             \n\
             Relief: drop or place within one club-length of the nearest point of relief. If \
             the ball rolls into another aeration hole, take relief again.",
        ),
        template(
            "construction_fence_relief",
            &[
                "construction fence",
                "mesh fence",
                "against the fence",
                "fence interfering with my swing",
                "fence relief",
            ],
            &["construction", "fence", "mesh", "relief"],
            2,
            &[],
            &[],
            Some("CCC-6"),
            "The fence around the Purple Line construction area (including mesh fencing) is a \
             boundary fence. NO FREE RELIEF is available from it, or from any fence at \
             Columbia.\n\
             \n\
             Your options:\n\
             - Play the ball as it lies if possible\n\
             - Declare the ball unplayable under Rule 19 (1 penalty stroke): drop within two \
             club-lengths no closer to the hole, drop back on the line from the hole through \
             the ball, or return to the previous spot.",
        ),
        template(
            "green_stakes_cart_path",
            &[
                "green stakes",
                "cart path behind 14",
                "cart path behind 17",
                "path behind the 14th green",
                "path behind the 17th green",
                "road behind the 12th green",
            ],
            &["green_stakes", "cart_path", "stakes", "path"],
            2,
            &[],
            &[],
            Some("CCC-4"),
            "Certain cart paths at Columbia Country Club are INTEGRAL OBJECTS with NO free \
             relief:\n\
             - Cart path sections behind the 14th green marked by green stakes\n\
             - Cart path sections behind the 17th green marked by green stakes\n\
             - The unpaved road behind the 12th green\n\
             \n\
             Options: play the ball as it lies, or declare it unplayable under Rule 19 (1 \
             penalty stroke).\n\
             \n\
             All other cart paths on the course DO give free relief under Rule 16.1.",
        ),
        template(
            "purple_line_boundary",
            &[
                "purple line",
                "over the train tracks",
                "across the train tracks",
                "ball in the tunnel",
                "construction boundary",
            ],
            &["purple_line", "construction", "boundary", "tunnel", "train_tracks"],
            1,
            &[],
            &[],
            Some("CCC-6"),
            "The Purple Line construction fence is a BOUNDARY: any ball that crosses it is \
             OUT OF BOUNDS, even if it comes to rest in a playable position, on the far side, \
             or inside a tunnel.\n\
             \n\
             Relief options:\n\
             OPTION 1 - Club special relief (2 penalty strokes): estimate where the ball \
             crossed, find the nearest fairway point, and drop within two club-lengths of the \
             lines between the hole and those points.\n\
             OPTION 2 - Standard rule (1 penalty stroke): stroke and distance.\n\
             \n\
             The boundary fence itself never gives free relief.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_ids_are_unique() {
        let templates = builtin_templates();
        let mut ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_every_template_has_triggers_and_answer() {
        for template in builtin_templates() {
            assert!(!template.triggers.is_empty(), "{} has no triggers", template.id);
            assert!(!template.answer.is_empty(), "{} has no answer", template.id);
        }
    }

    #[test]
    fn test_rule_ids_resolve_in_corpus() {
        let corpus = crate::corpus::RuleCorpus::with_builtin();
        for template in builtin_templates() {
            if let Some(rule_id) = &template.rule_id {
                assert!(
                    corpus.get(rule_id).is_some(),
                    "{} references missing rule {rule_id}",
                    template.id
                );
            }
        }
    }
}
