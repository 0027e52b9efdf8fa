// Welcome lines for new members. The Discord layer decides where they go.

use rand::seq::SliceRandom;
use rand::Rng;

const MEMBER_PLACEHOLDER: &str = "{member}";

const WELCOME_TEMPLATES: [&str; 4] = [
    "Yooo {member}, welcome to the team! 🔥",
    "{member} just pulled up. Make some room! 🎉",
    "Welcome {member}! Grab a seat and say hi 👋",
    "A wild {member} appeared! 🎮",
];

/// Pick a random welcome line for the given member mention.
pub fn welcome_line(member_mention: &str) -> String {
    welcome_line_with(&mut rand::thread_rng(), member_mention)
}

pub fn welcome_line_with<R: Rng + ?Sized>(rng: &mut R, member_mention: &str) -> String {
    let template = WELCOME_TEMPLATES
        .choose(rng)
        .copied()
        .unwrap_or(WELCOME_TEMPLATES[0]);
    template.replace(MEMBER_PLACEHOLDER, member_mention)
}
