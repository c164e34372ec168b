//! Plain-text listing of who gifts whom.

use santa_assign::ParticipantSet;
use santa_core::ParticipantId;

/// Renders the `Gifting Matches:` block, one line per participant in roster order.
pub fn render_pairs(set: &ParticipantSet) -> String {
    let mut out = String::from("Gifting Matches:\n");
    for participant in set.iter() {
        out.push_str(&format!(
            "Participant: {}, Gifting To: {}\n",
            participant.id(),
            join_names(participant.assigned_to())
        ));
    }
    out
}

/// `A`, `A and B`, `A, B, and C`.
fn join_names(names: &[ParticipantId]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{}, and {last}", head.join(", "))
        }
    }
}
