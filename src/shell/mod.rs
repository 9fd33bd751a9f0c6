//! Shell integration scripts.
//!
//! Each hook tracks directory changes by calling `zoink add` and defines a `z`
//! function that jumps to the best match from `zoink find --echo`. Installing the
//! script is left to the user (`eval "$(zoink init bash)"` and friends).

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Integration script for `shell`
pub fn hook(shell: Shell) -> &'static str {
    match shell {
        Shell::Bash => BASH_HOOK,
        Shell::Zsh => ZSH_HOOK,
        Shell::Fish => FISH_HOOK,
    }
}

const BASH_HOOK: &str = r#"# zoink shell integration (bash)
__zoink_track() {
    command zoink add "$PWD" "$OLDPWD" >/dev/null 2>&1
}

cd() { builtin cd "$@" && __zoink_track; }
pushd() { builtin pushd "$@" && __zoink_track; }
popd() { builtin popd "$@" && __zoink_track; }

z() {
    local result
    result="$(command zoink find --echo "$@")" || return $?
    [ -n "$result" ] && [ -d "$result" ] && builtin cd "$result" && __zoink_track
}

__zoink_track
"#;

const ZSH_HOOK: &str = r#"# zoink shell integration (zsh)
__zoink_track() {
    command zoink add "$PWD" "$OLDPWD" >/dev/null 2>&1
}

autoload -Uz add-zsh-hook
add-zsh-hook chpwd __zoink_track

z() {
    local result
    result="$(command zoink find --echo "$@")" || return $?
    [[ -n "$result" && -d "$result" ]] && builtin cd "$result"
}

__zoink_track
"#;

const FISH_HOOK: &str = r#"# zoink shell integration (fish)
function __zoink_track --on-variable PWD
    command zoink add "$PWD" "$dirprev[-1]" >/dev/null 2>&1
end

function z
    set -l result (command zoink find --echo $argv)
    or return $status
    if test -n "$result"; and test -d "$result"
        cd "$result"
    end
end

__zoink_track
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_hook_tracks_and_jumps() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let script = hook(shell);
            assert!(script.contains("zoink add"), "{:?} hook should track visits", shell);
            assert!(script.contains("zoink find --echo"), "{:?} hook should define z", shell);
        }
    }

    #[test]
    fn test_fish_hook_uses_fish_syntax() {
        let script = hook(Shell::Fish);
        assert!(script.contains("--on-variable PWD"));
        assert!(!script.contains("builtin pushd"));
    }

    #[test]
    fn test_zsh_hook_uses_chpwd() {
        assert!(hook(Shell::Zsh).contains("add-zsh-hook chpwd"));
    }
}
