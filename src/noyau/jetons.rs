// src/noyau/jetons.rs

use std::fmt;

use super::erreur::ErreurCalcul;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Noms de fonctions (sin, cos, tan, log, ln, sqrt, pow10)
    // NOTE: l’analyse décidera si le nom est connu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,   // ^
    Percent, // modulo
    Bang,    // factorielle (postfixe)

    LPar,
    RPar,
}

/// Tokenize une chaîne CANONIQUE (voir canon::normalise) en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, .5, 5.)
/// - notation scientifique (ex: 1.23e+3, 4e-7) : un résultat affiché se relit
/// - opérateurs + - * / ^ % !
/// - parenthèses ( )
/// - identifiants [a-zA-Z][a-zA-Z0-9]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '%' => Some(Tok::Percent),
            '!' => Some(Tok::Bang),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre : chiffres [. chiffres] [e [+-] chiffres]
        if c.is_ascii_digit() || c == '.' {
            let (v, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(v));
            i = fin;
            continue;
        }

        return Err(ErreurCalcul::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

fn lire_nombre(chars: &[char], debut: usize) -> Result<(f64, usize), ErreurCalcul> {
    let mut i = debut;
    let mut points = 0;
    let mut chiffres = 0;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        if chars[i] == '.' {
            points += 1;
        } else {
            chiffres += 1;
        }
        i += 1;
    }

    if points > 1 {
        return Err(ErreurCalcul::syntaxe("nombre invalide (deux points décimaux)"));
    }
    if chiffres == 0 {
        return Err(ErreurCalcul::syntaxe("nombre invalide"));
    }

    // exposant seulement si suivi d’au moins un chiffre, sinon 'e' reste un identifiant
    if i < chars.len() && chars[i] == 'e' {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let txt: String = chars[debut..i].iter().collect();
    let v = txt
        .parse::<f64>()
        .map_err(|_| ErreurCalcul::syntaxe(format!("nombre invalide: {txt}")))?;
    Ok((v, i))
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Ident(name) => f.write_str(name),

            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::Caret => f.write_str("^"),
            Tok::Percent => f.write_str("%"),
            Tok::Bang => f.write_str("!"),

            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

/// Format utilitaire (“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
