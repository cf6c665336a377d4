// src/noyau/canon.rs
//
// Forme canonique du texte (avant jetons) :
// - glyphes d’affichage -> opérateurs canoniques (× -> *, ÷ -> /, − -> -, ** -> ^)
// - √ -> sqrt
// - constantes PI / π / EPS -> littéral flottant entre parenthèses
//
// + Règle de multiplication implicite, appliquée à la SAISIE (pas à l’évaluation) :
//   "2" puis "(" => "2×(" ; "3" puis "sin(" => "3×sin(" ; ")" puis "PI" => ")×PI".
//
// Le littéral est parenthésé : "2PI" donne "2(3.14…)" (erreur de syntaxe)
// et jamais "23.14…".

use std::f64::consts::{E, PI};

/// Glyphe de multiplication inséré par la saisie.
pub const MUL_AFFICHAGE: char = '×';

/// Identifiants de constantes tels qu’ils apparaissent dans l’entrée.
pub const CONSTANTES: [(&str, f64); 2] = [("PI", PI), ("EPS", E)];

/// Texte d’entrée -> texte canonique. Aucun effet de bord.
pub fn normalise(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 16);
    let mut i: usize = 0;

    'boucle: while i < chars.len() {
        let c = chars[i];

        for (nom, valeur) in CONSTANTES {
            if commence_par(&chars, i, nom) {
                push_litteral(&mut out, valeur);
                i += nom.chars().count();
                continue 'boucle;
            }
        }

        match c {
            '×' => out.push('*'),
            '÷' => out.push('/'),
            '−' => out.push('-'),
            '*' if chars.get(i + 1) == Some(&'*') => {
                out.push('^');
                i += 2;
                continue;
            }
            'π' => push_litteral(&mut out, PI),
            '√' => out.push_str("sqrt"),
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

fn commence_par(chars: &[char], i: usize, motif: &str) -> bool {
    let mut j = i;
    for m in motif.chars() {
        if chars.get(j) != Some(&m) {
            return false;
        }
        j += 1;
    }
    true
}

fn push_litteral(out: &mut String, v: f64) {
    // Display f64 : plus courte écriture qui se relit exactement
    out.push('(');
    out.push_str(&v.to_string());
    out.push(')');
}

/* ------------------------ Multiplication implicite (saisie) ------------------------ */

/// Opérateurs binaires (glyphes d’affichage ET canoniques).
pub fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '−' | '×' | '*' | '/' | '÷' | '^' | '%')
}

/// Vrai si `ajout` commence un opérande “collable” : '(' , fonction, constante.
fn ouvre_operande(ajout: &str) -> bool {
    match ajout.chars().next() {
        Some(c) => c == '(' || c == 'π' || c == '√' || c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Faut-il insérer un × avant d’ajouter `ajout` à `entree` ?
///
/// Oui si l’entrée est non vide, que son dernier caractère n’est ni un opérateur
/// ni '(' , et que l’ajout est '(' , un nom de fonction ou une constante.
pub fn doit_inserer_mul(entree: &str, ajout: &str) -> bool {
    let dernier = match entree.trim_end().chars().last() {
        Some(c) => c,
        None => return false,
    };
    !est_operateur(dernier) && dernier != '(' && ouvre_operande(ajout)
}

/// Ajoute un jeton à l’entrée en appliquant la multiplication implicite.
pub fn ajoute_jeton(entree: &mut String, ajout: &str) {
    if doit_inserer_mul(entree, ajout) {
        entree.push(MUL_AFFICHAGE);
    }
    entree.push_str(ajout);
}
