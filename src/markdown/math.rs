//! LaTeX-to-Unicode approximation used by the preview's typeset pass.
//!
//! Covers the commands that show up in everyday notes: Greek letters,
//! common operators, relations and arrows, `\frac`, and `^`/`_`
//! scripts. Anything unknown is left as written.

const SYMBOLS: &[(&str, &str)] = &[
    // Longest names first where one is a prefix of another.
    ("\\varepsilon", "ε"), ("\\epsilon", "ε"), ("\\vartheta", "ϑ"), ("\\theta", "θ"),
    ("\\varphi", "ϕ"), ("\\phi", "φ"), ("\\alpha", "α"), ("\\beta", "β"),
    ("\\gamma", "γ"), ("\\delta", "δ"), ("\\zeta", "ζ"), ("\\eta", "η"),
    ("\\iota", "ι"), ("\\kappa", "κ"), ("\\lambda", "λ"), ("\\mu", "μ"),
    ("\\nu", "ν"), ("\\xi", "ξ"), ("\\pi", "π"), ("\\rho", "ρ"),
    ("\\sigma", "σ"), ("\\tau", "τ"), ("\\upsilon", "υ"), ("\\chi", "χ"),
    ("\\psi", "ψ"), ("\\omega", "ω"),
    ("\\Gamma", "Γ"), ("\\Delta", "Δ"), ("\\Theta", "Θ"), ("\\Lambda", "Λ"),
    ("\\Xi", "Ξ"), ("\\Pi", "Π"), ("\\Sigma", "Σ"), ("\\Phi", "Φ"),
    ("\\Psi", "Ψ"), ("\\Omega", "Ω"),
    ("\\iiint", "∭"), ("\\iint", "∬"), ("\\oint", "∮"), ("\\int", "∫"),
    ("\\sum", "∑"), ("\\prod", "∏"), ("\\sqrt", "√"), ("\\partial", "∂"),
    ("\\nabla", "∇"), ("\\infty", "∞"),
    ("\\leq", "≤"), ("\\geq", "≥"), ("\\neq", "≠"), ("\\approx", "≈"),
    ("\\equiv", "≡"), ("\\propto", "∝"), ("\\sim", "∼"),
    ("\\pm", "±"), ("\\mp", "∓"), ("\\times", "×"), ("\\div", "÷"),
    ("\\cdots", "⋯"), ("\\cdot", "·"), ("\\circ", "∘"),
    ("\\Leftrightarrow", "⇔"), ("\\leftrightarrow", "↔"), ("\\Rightarrow", "⇒"),
    ("\\rightarrow", "→"), ("\\Leftarrow", "⇐"), ("\\leftarrow", "←"),
    ("\\mapsto", "↦"), ("\\to", "→"),
    ("\\notin", "∉"), ("\\subseteq", "⊆"), ("\\supseteq", "⊇"), ("\\subset", "⊂"),
    ("\\supset", "⊃"), ("\\cup", "∪"), ("\\cap", "∩"), ("\\emptyset", "∅"),
    ("\\forall", "∀"), ("\\exists", "∃"), ("\\neg", "¬"), ("\\wedge", "∧"),
    ("\\vee", "∨"), ("\\in", "∈"),
    ("\\ldots", "…"), ("\\dots", "…"),
    ("\\qquad", "  "), ("\\quad", " "), ("\\,", ""), ("\\;", " "), ("\\!", ""),
    ("\\left", ""), ("\\right", ""),
];

/// Converts LaTeX math source to a Unicode approximation.
pub fn latex_to_unicode(input: &str) -> String {
    let mut s = input.trim().to_string();
    for (cmd, repl) in SYMBOLS {
        s = replace_command(&s, cmd, repl);
    }
    s = replace_fracs(&s);
    scripts(&s)
}

/// Replaces `cmd` only where it is not the prefix of a longer command
/// (`\in` must not eat the start of `\infty`).
fn replace_command(s: &str, cmd: &str, repl: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find(cmd) {
        let after = &rest[pos + cmd.len()..];
        let continues_word = cmd.chars().last().is_some_and(|c| c.is_ascii_alphabetic())
            && after.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        out.push_str(&rest[..pos]);
        if continues_word {
            out.push_str(cmd);
        } else {
            out.push_str(repl);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// `\frac{a}{b}` becomes `a⁄b`, parenthesized when either side is longer
/// than one character.
fn replace_fracs(input: &str) -> String {
    let mut s = input.to_string();
    while let Some(start) = s.find("\\frac{") {
        let numer_start = start + "\\frac{".len();
        let Some(numer_end) = matching_brace(&s, numer_start) else { break };
        if !s[numer_end + 1..].starts_with('{') {
            break;
        }
        let denom_start = numer_end + 2;
        let Some(denom_end) = matching_brace(&s, denom_start) else { break };

        let numer = &s[numer_start..numer_end];
        let denom = &s[denom_start..denom_end];
        let frac = if numer.chars().count() == 1 && denom.chars().count() == 1 {
            format!("{}⁄{}", numer, denom)
        } else {
            format!("({})⁄({})", numer, denom)
        };
        s = format!("{}{}{}", &s[..start], frac, &s[denom_end + 1..]);
    }
    s
}

/// Byte index of the `}` closing a group whose content starts at `from`.
fn matching_brace(s: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, ch) in s[from..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrites `^x`, `^{xy}`, `_x`, `_{xy}` with Unicode script characters
/// where every character has one; otherwise keeps the `^(..)` form.
fn scripts(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if (ch == '^' || ch == '_') && i + 1 < chars.len() {
            let map: fn(char) -> Option<char> = if ch == '^' { superscript } else { subscript };
            let (group, next) = if chars[i + 1] == '{' {
                let mut depth = 1;
                let mut j = i + 2;
                while j < chars.len() {
                    match chars[j] {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    j += 1;
                }
                (chars[i + 2..j.min(chars.len())].iter().collect::<String>(), j + 1)
            } else {
                (chars[i + 1].to_string(), i + 2)
            };

            match group.chars().map(map).collect::<Option<String>>() {
                Some(mapped) => out.push_str(&mapped),
                None => {
                    out.push(ch);
                    out.push('(');
                    out.push_str(&group);
                    out.push(')');
                }
            }
            i = next;
            continue;
        }
        if ch != '{' && ch != '}' {
            out.push(ch);
        }
        i += 1;
    }
    out
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰', '1' => '¹', '2' => '²', '3' => '³', '4' => '⁴',
        '5' => '⁵', '6' => '⁶', '7' => '⁷', '8' => '⁸', '9' => '⁹',
        '+' => '⁺', '-' => '⁻', '=' => '⁼', '(' => '⁽', ')' => '⁾',
        'n' => 'ⁿ', 'i' => 'ⁱ', 'T' => 'ᵀ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀', '1' => '₁', '2' => '₂', '3' => '₃', '4' => '₄',
        '5' => '₅', '6' => '₆', '7' => '₇', '8' => '₈', '9' => '₉',
        '+' => '₊', '-' => '₋', '=' => '₌', '(' => '₍', ')' => '₎',
        'a' => 'ₐ', 'e' => 'ₑ', 'i' => 'ᵢ', 'j' => 'ⱼ', 'k' => 'ₖ',
        'n' => 'ₙ', 'o' => 'ₒ', 'x' => 'ₓ',
        _ => return None,
    })
}
