//! Placeholder substitution for member greetings.

/// Facts about a member that greeting templates may reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberContext {
    /// Platform mention markup for the member (`{user}`).
    pub mention: String,
    /// Display name of the member (`{username}`).
    pub username: String,
    /// Name of the server (`{server}`).
    pub server: String,
    /// Avatar URL used for embed thumbnails.
    pub avatar_url: Option<String>,
}

impl MemberContext {
    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "user" => Some(&self.mention),
            "username" => Some(&self.username),
            "server" => Some(&self.server),
            _ => None,
        }
    }
}

/// Substitute `{user}`, `{username}` and `{server}` in a template.
///
/// Unknown placeholders and unbalanced braces are copied through unchanged.
///
/// # Examples
///
/// ```
/// use steward_core::{MemberContext, render_template};
///
/// let member = MemberContext {
///     mention: "<@42>".into(),
///     username: "ferris".into(),
///     server: "Crab Club".into(),
///     avatar_url: None,
/// };
/// assert_eq!(
///     render_template("Welcome {user} to {server}! {unknown}", &member),
///     "Welcome <@42> to Crab Club! {unknown}"
/// );
/// ```
pub fn render_template(template: &str, member: &MemberContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match member.lookup(key) {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> MemberContext {
        MemberContext {
            mention: "<@1>".into(),
            username: "alice".into(),
            server: "Home".into(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_repeated_placeholders() {
        assert_eq!(
            render_template("{username} {username} @ {server}", &member()),
            "alice alice @ Home"
        );
    }

    #[test]
    fn test_unbalanced_braces_pass_through() {
        assert_eq!(render_template("hi {user", &member()), "hi {user");
        assert_eq!(render_template("}{user}{", &member()), "}<@1>{");
        assert_eq!(render_template("{{user}}", &member()), "{{user}}");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(render_template("plain text", &member()), "plain text");
        assert_eq!(render_template("", &member()), "");
    }
}
