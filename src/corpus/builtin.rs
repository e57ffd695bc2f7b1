//! Built-in rule data for Columbia Country Club
//!
//! Condensed club rules plus the slice of the general rulebook the
//! adjacency table and exception patterns reference. Static data only; no
//! file parsing happens here or anywhere else in the core.

use crate::models::RuleCondition;
use crate::models::RuleRecord;

fn kw(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn cond(situation: &str, explanation: &str, examples: &[&str]) -> RuleCondition {
    RuleCondition {
        situation: situation.to_string(),
        explanation: explanation.to_string(),
        examples: examples.iter().map(|e| (*e).to_string()).collect(),
    }
}

/// Club-specific local rules
pub fn club_rules() -> Vec<RuleRecord> {
    vec![
        RuleRecord::new(
            "CCC-1",
            "Alternative relief for lost ball or out of bounds",
            "When a ball is lost outside a penalty area or is out of bounds, the player may, \
             for two penalty strokes, estimate where the ball was lost or crossed the boundary, \
             find the nearest fairway point no closer to the hole, and drop within two \
             club-lengths of the line between those reference points and the hole. The standard \
             stroke-and-distance option under Rule 18.2 remains available for one penalty stroke.",
            kw(&[
                "lost ball",
                "out of bounds",
                "stroke and distance",
                "fairway point",
                "two club-lengths",
                "woods",
                "fence",
            ]),
            true,
            vec![cond(
                "Exception: maintenance area left of the 10th hole",
                "A ball hit into the maintenance area to the left of #10 gets free relief \
                 whether or not the ball is found.",
                &["ball over the fence left of 10", "ball lost near the maintenance buildings"],
            )],
        ),
        RuleRecord::new(
            "CCC-2",
            "Penalty area relief on holes 16 and 17",
            "On the 16th hole, the penalty area south of the footbridge is marked with yellow \
             stakes and the area north of the footbridge with red stakes. In addition to relief \
             under Rule 17.1, a dropping zone is available near the 16th green. On the 17th \
             hole, a dropping zone near the green is available for balls in the pond west of \
             the footbridge.",
            kw(&[
                "water",
                "penalty area",
                "dropping zone",
                "yellow stakes",
                "red stakes",
                "footbridge",
                "pond",
                "16",
                "17",
            ]),
            true,
            vec![
                cond(
                    "Red stakes north of the footbridge on 16",
                    "An additional lateral option applies: drop within two club-lengths of the \
                     estimated crossing point, no closer to the hole, for one penalty stroke.",
                    &["ball in the creek on 16 past the bridge"],
                ),
                cond(
                    "Exception: dropping zone scope on 17",
                    "The 17th dropping zone serves only the main pond; balls in other penalty \
                     areas on the hole, including on the cart bridge, get Rule 17.1 relief only.",
                    &["ball on the cart bridge on 17"],
                ),
            ],
        ),
        RuleRecord::new(
            "CCC-4",
            "Cart paths designated as integral objects",
            "The cart path sections behind the 14th and 17th greens marked by green stakes, and \
             the unpaved road behind the 12th green, are integral objects. No free relief is \
             available; the player may play the ball as it lies or proceed under Rule 19. All \
             other cart paths on the course provide free relief under Rule 16.1.",
            kw(&[
                "cart path",
                "green stakes",
                "integral object",
                "no relief",
                "14",
                "17",
                "unpaved road",
            ]),
            true,
            vec![],
        ),
        RuleRecord::new(
            "CCC-6",
            "Purple Line construction boundary",
            "The fence around the Purple Line construction area, including mesh fencing, is a \
             boundary fence. A ball that crosses the boundary is out of bounds even if it comes \
             to rest in a playable position beyond the line, inside a tunnel, or across the \
             train tracks. No free relief is available from the fence or any boundary fence on \
             the course.",
            kw(&[
                "purple line",
                "construction",
                "boundary",
                "train tracks",
                "mesh fence",
                "out of bounds",
                "tunnel",
            ]),
            true,
            vec![cond(
                "Ball near or against the boundary fence",
                "Play the ball as it lies or treat it as unplayable under Rule 19; the fence \
                 itself never gives relief.",
                &["ball resting against the construction mesh"],
            )],
        ),
        RuleRecord::new(
            "CCC-7",
            "Maintenance facility obstruction",
            "The entire maintenance complex near holes 9 and 10, including buildings, storage \
             tanks, sheds, paved and gravel areas, retention ponds, and parked equipment, is \
             treated as one immovable obstruction. Free relief under Rule 16.1: drop within one \
             club-length of the nearest point of complete relief, no closer to the hole.",
            kw(&[
                "maintenance",
                "facility",
                "building",
                "shed",
                "equipment",
                "immovable obstruction",
                "free relief",
            ]),
            true,
            vec![],
        ),
        RuleRecord::new(
            "CCC-8",
            "Turf nursery no play zone",
            "The turf nursery adjacent to the maintenance area is a no play zone. The ball must \
             not be played as it lies; the player must take free relief under Rule 16.1f at the \
             nearest point of complete relief, within one club-length, no closer to the hole.",
            kw(&[
                "turf nursery",
                "no play zone",
                "sod farm",
                "grass farm",
                "mandatory relief",
            ]),
            true,
            vec![cond(
                "Relief is mandatory, not optional",
                "Unlike ordinary ground under repair, playing from the nursery is prohibited.",
                &["ball sitting cleanly on the nursery sod"],
            )],
        ),
        RuleRecord::new(
            "CCC-11",
            "Aeration holes",
            "When a ball lies in or touches an aeration hole, or an aeration hole interferes \
             with the area of intended swing, the player may take free relief by dropping or \
             placing within one club-length of the nearest point of relief. If the ball rolls \
             into another aeration hole, relief may be taken again.",
            kw(&["aeration", "punched green", "aerify", "free relief"]),
            true,
            vec![cond(
                "Exception: stance or line of putt only",
                "No relief when the aeration hole affects only the player's stance, or on the \
                 putting green only the line of putt.",
                &["standing on an aeration hole", "aeration hole on the putting line"],
            )],
        ),
    ]
}

/// General rulebook subset
pub fn general_rules() -> Vec<RuleRecord> {
    vec![
        RuleRecord::new(
            "8.1",
            "Actions that improve conditions affecting the stroke",
            "A player must not improve the lie of the ball, the area of intended stance or \
             swing, the line of play, or the relief area where a ball will be dropped, by \
             moving, bending or breaking growing objects, or removing or pressing down sand, \
             soil, or turf.",
            kw(&["improve conditions", "lie", "stance", "swing", "line of play"]),
            false,
            vec![cond(
                "Exception: restoration under Rule 8.1d",
                "Conditions worsened after the ball came to rest may be restored in the \
                 circumstances Rule 8.1d allows.",
                &[],
            )],
        ),
        RuleRecord::new(
            "8.1d",
            "Restoring conditions worsened after ball came to rest",
            "When conditions affecting the stroke are worsened after the ball came to rest by \
             a person other than the player or by an animal, the player may restore the \
             original conditions as nearly as possible, without penalty.",
            kw(&["restore conditions", "worsened", "another player", "no penalty"]),
            false,
            vec![cond(
                "Exception: worsened by the player or natural forces",
                "No restoration is allowed when the player worsened the conditions or when wind \
                 and water did.",
                &["divot blown onto the line by wind"],
            )],
        ),
        RuleRecord::new(
            "9.1",
            "Ball played as it lies",
            "The ball must be played as it lies, except when the Rules require or allow \
             otherwise. If the ball moves during the backswing or stroke and the stroke is \
             made, the ball must not be replaced.",
            kw(&["play as it lies", "ball moved", "backswing"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "9.2",
            "Deciding whether ball moved and what caused it",
            "A ball at rest is treated as moved only if it is known or virtually certain that \
             it moved. The cause determines the applicable rule: the player, an opponent, an \
             outside influence, or natural forces.",
            kw(&["known or virtually certain", "cause of movement"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "9.3",
            "Ball moved by natural forces",
            "If natural forces such as wind or water move a ball at rest, there is no penalty \
             and the ball is played from its new spot.",
            kw(&["natural forces", "wind", "water", "no penalty", "new spot"]),
            false,
            vec![cond(
                "Exception: ball on the putting green after being marked",
                "A ball that had already been lifted and replaced on the putting green must be \
                 replaced on its original spot, whatever moved it.",
                &["replaced ball blown off its mark"],
            )],
        ),
        RuleRecord::new(
            "9.4",
            "Ball lifted or moved by player",
            "If the player lifts or accidentally moves their ball at rest, the ball must be \
             replaced and the player generally gets one penalty stroke.",
            kw(&["player moved ball", "accidental", "replace", "one penalty stroke"]),
            false,
            vec![cond(
                "Exception: accidental movement while searching",
                "No penalty when the ball is accidentally moved while fairly searching for it; \
                 the ball is replaced.",
                &["kicked the ball walking through the rough while searching"],
            )],
        ),
        RuleRecord::new(
            "9.5",
            "Ball moved by opponent in match play",
            "If an opponent lifts or deliberately touches the player's ball or causes it to \
             move, the opponent generally gets one penalty stroke, and the ball must be \
             replaced.",
            kw(&["opponent", "deliberate", "match play", "replace"]),
            false,
            vec![cond(
                "Exception: accidental movement during search",
                "No penalty when the opponent moves the ball accidentally while helping to \
                 search for it.",
                &[],
            )],
        ),
        RuleRecord::new(
            "9.6",
            "Ball moved by outside influence",
            "If an outside influence moves a ball at rest, there is no penalty and the ball \
             must be replaced on its original spot, estimated if not known.",
            kw(&["outside influence", "spectator", "animal", "replace", "no penalty"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "11.1",
            "Ball in motion accidentally hits person or outside influence",
            "If a player's ball in motion accidentally hits any person or outside influence, \
             there is no penalty to any player and the ball is normally played as it lies.",
            kw(&["ball in motion", "deflected", "accidental", "no penalty"]),
            false,
            vec![cond(
                "Exception: ball played from the putting green",
                "A stroke made on the putting green that hits a person, animal, or movable \
                 obstruction on the green is replayed.",
                &["putt strikes another ball marker"],
            )],
        ),
        RuleRecord::new(
            "11.2",
            "Ball in motion deliberately deflected or stopped by person",
            "If a person deliberately deflects or stops a ball in motion, the stroke is not \
             replayed and the ball is dropped at the estimated spot where it would have come \
             to rest; the deflecting player gets the general penalty.",
            kw(&["deliberately deflected", "stopped", "general penalty", "estimated spot"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "11.3",
            "Deliberately removing objects affecting ball in motion",
            "While a ball is in motion, a player must not deliberately remove a loose \
             impediment or movable obstruction, or alter physical conditions, to affect where \
             the ball might come to rest.",
            kw(&["ball in motion", "loose impediment", "movable obstruction"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "13.1",
            "Actions allowed on the putting green",
            "On the putting green a player may mark, lift, and clean the ball, and may repair \
             damage such as ball marks, shoe damage, and old hole plugs without penalty, \
             including on the line of play.",
            kw(&["putting green", "mark", "lift", "clean", "repair damage"]),
            false,
            vec![cond(
                "Exception: damage from natural wear",
                "Natural surface imperfections, aeration holes, and natural wear of the hole \
                 are not damage that may be repaired.",
                &["widening a worn hole edge"],
            )],
        ),
        RuleRecord::new(
            "13.1c",
            "Improvements on and around the putting green",
            "Repair of damage is allowed only on the putting green itself; damage on the \
             fringe or elsewhere on the course generally must not be repaired before the \
             stroke.",
            kw(&["fringe", "repair", "pitch mark", "putting green"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "13.1d",
            "Ball or ball-marker moves on the putting green",
            "If the ball moves on the putting green after the player had already lifted and \
             replaced it, it must be replaced on its original spot, whatever caused the \
             movement, without penalty.",
            kw(&["ball moved", "putting green", "replaced", "no penalty"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "14.2",
            "Replacing a ball on a spot",
            "When a lifted or moved ball must be replaced, the original spot is used, \
             estimated if not known, and the ball must be set down by hand on that spot.",
            kw(&["replace", "original spot", "estimated"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "14.2d",
            "Where to replace when original lie is altered",
            "If the lie of a replaced ball is altered, or the ball moves again after being \
             replaced, the player replaces it in the nearest similar lie within one \
             club-length of the original spot, no closer to the hole.",
            kw(&["lie altered", "replaced ball moved", "nearest similar lie"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "16.1",
            "Relief from abnormal course conditions",
            "Free relief is available when the ball touches or lies in or on an abnormal \
             course condition, or such a condition interferes with the area of intended stance \
             or swing: animal holes, ground under repair, immovable obstructions, and \
             temporary water.",
            kw(&[
                "abnormal course condition",
                "ground under repair",
                "immovable obstruction",
                "temporary water",
                "free relief",
            ]),
            false,
            vec![cond(
                "Exception: clearly unreasonable stroke",
                "No free relief when playing the ball is clearly unreasonable for reasons \
                 other than the condition itself.",
                &["ball unplayable in a bush beside a cart path"],
            )],
        ),
        RuleRecord::new(
            "16.1f",
            "Mandatory relief from a no play zone",
            "When a ball is in a no play zone inside an abnormal course condition, or the zone \
             interferes with stance or swing, the player must not play the ball as it lies and \
             must take complete relief.",
            kw(&["no play zone", "must take relief", "complete relief"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "17.1",
            "Options for ball in penalty area",
            "A ball in a penalty area may be played as it lies without penalty, or relief may \
             be taken for one penalty stroke: stroke-and-distance, or back-on-the-line keeping \
             the point where the ball last crossed between the hole and the drop.",
            kw(&[
                "penalty area",
                "water",
                "stroke and distance",
                "back on the line",
                "one penalty stroke",
            ]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "17.1d",
            "Relief options by penalty area marking",
            "For a red penalty area there is an additional lateral option: drop within two \
             club-lengths of the point where the ball last crossed the edge, no closer to the \
             hole.",
            kw(&["red penalty area", "lateral relief", "two club-lengths", "yellow"]),
            false,
            vec![cond(
                "Exception: yellow penalty areas",
                "Lateral relief is not available from a yellow penalty area unless a local \
                 rule provides it.",
                &[],
            )],
        ),
        RuleRecord::new(
            "17.2",
            "Ball played from penalty area ends up in same or another penalty area",
            "When a ball played from a penalty area comes to rest in a penalty area, the \
             player may take relief measured from where the last stroke was made, with the \
             normal penalty-area options.",
            kw(&["played from penalty area", "relief options"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "18.2",
            "Ball lost or out of bounds: stroke and distance",
            "If a ball is lost or out of bounds, the player must take stroke-and-distance \
             relief: one penalty stroke, playing again from where the previous stroke was \
             made. A ball is lost if not found within three minutes of beginning to search.",
            kw(&[
                "lost ball",
                "out of bounds",
                "stroke and distance",
                "three minutes",
                "white stakes",
            ]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "19",
            "Unplayable ball",
            "A player may declare the ball unplayable anywhere except in a penalty area, for \
             one penalty stroke, and proceed with stroke-and-distance, back-on-the-line, or \
             lateral relief within two club-lengths.",
            kw(&["unplayable", "two club-lengths", "back on the line", "one penalty stroke"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "19.2",
            "Unplayable ball relief in the general area",
            "In the general area the unplayable-ball options are stroke-and-distance, \
             back-on-the-line relief, and lateral relief within two club-lengths no closer to \
             the hole, each for one penalty stroke.",
            kw(&["unplayable", "general area", "lateral relief"]),
            false,
            vec![],
        ),
        RuleRecord::new(
            "19.3",
            "Unplayable ball in a bunker",
            "For a ball unplayable in a bunker, the normal options apply inside the bunker \
             for one penalty stroke, or the ball may be dropped outside the bunker \
             back-on-the-line for two penalty strokes.",
            kw(&["unplayable", "bunker", "two penalty strokes"]),
            false,
            vec![],
        ),
    ]
}
