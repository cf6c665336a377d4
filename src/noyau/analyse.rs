// src/noyau/analyse.rs
//
// Descente récursive (précédence par niveaux) : Tok -> Expr, en une passe.
//
// Précédence, de la plus forte à la plus faible:
//   !  (postfixe)
//   %  (modulo, gauche : opérandes adjacents, 2^3%3 = 2^(3%3))
//   ^  (associatif à DROITE : 2^3^2 = 2^9)
//   - +  (unaires : -2^2 = -(2^2) ; + est l’identité)
//   * /  (gauche)
//   + -  (gauche)
//
// Pré-validation : entrée vide, parenthèses non équilibrées.
// Tout le reste (opérande manquant, opérateur en fin, nom inconnu…) est
// détecté pendant la descente : jamais de “0 implicite”.

use super::erreur::ErreurCalcul;
use super::expr::{Expr, Op};
use super::fonctions::Fonction;
use super::jetons::Tok;

/// Niveau des signes unaires : sous ^ et %.
const PREC_UNAIRE: i32 = 4;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 5,
        Tok::Percent => 6,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn op_binaire(t: &Tok) -> Option<Op> {
    Some(match t {
        Tok::Plus => Op::Add,
        Tok::Minus => Op::Sub,
        Tok::Star => Op::Mul,
        Tok::Slash => Op::Div,
        Tok::Caret => Op::Pow,
        Tok::Percent => Op::Mod,
        _ => return None,
    })
}

/// Parenthèses équilibrées (jamais de ')' orpheline, tout '(' fermé).
pub fn verifie_parentheses(tokens: &[Tok]) -> Result<(), ErreurCalcul> {
    let mut profondeur: usize = 0;
    for t in tokens {
        match t {
            Tok::LPar => profondeur += 1,
            Tok::RPar => {
                profondeur = profondeur
                    .checked_sub(1)
                    .ok_or_else(|| ErreurCalcul::syntaxe("parenthèse fermante sans ouvrante"))?;
            }
            _ => {}
        }
    }
    if profondeur != 0 {
        return Err(ErreurCalcul::syntaxe("parenthèses non fermées"));
    }
    Ok(())
}

/// Construit l’AST d’une suite de jetons complète.
pub fn analyse(tokens: &[Tok]) -> Result<Expr, ErreurCalcul> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::syntaxe("expression vide"));
    }
    verifie_parentheses(tokens)?;

    let mut a = Analyseur { jetons: tokens, pos: 0 };
    let e = a.expression(1)?;

    if let Some(t) = a.courant() {
        return Err(ErreurCalcul::syntaxe(format!(
            "opérateur manquant avant '{t}'"
        )));
    }
    Ok(e)
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
}

impl<'a> Analyseur<'a> {
    fn courant(&self) -> Option<&'a Tok> {
        self.jetons.get(self.pos)
    }

    fn attend(&mut self, attendu: Tok, msg: &str) -> Result<(), ErreurCalcul> {
        match self.courant() {
            Some(t) if *t == attendu => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(ErreurCalcul::syntaxe(msg)),
        }
    }

    /// Opérateurs binaires de précédence >= `min_prec`.
    fn expression(&mut self, min_prec: i32) -> Result<Expr, ErreurCalcul> {
        let mut gauche = self.unaire()?;

        while let Some(tok) = self.courant() {
            let p = precedence(tok);
            if p == 0 || p < min_prec {
                break;
            }
            let op = match op_binaire(tok) {
                Some(op) => op,
                None => break,
            };
            self.pos += 1;

            let p_droite = if is_right_associative(tok) { p } else { p + 1 };
            let droite = self.expression(p_droite)?;
            gauche = Expr::binaire(op, gauche, droite);
        }

        Ok(gauche)
    }

    fn unaire(&mut self) -> Result<Expr, ErreurCalcul> {
        match self.courant() {
            Some(Tok::Minus) => {
                self.pos += 1;
                let x = self.expression(PREC_UNAIRE)?;
                Ok(Expr::Neg(Box::new(x)))
            }
            // (+2) : identité, aucun noeud
            Some(Tok::Plus) => {
                self.pos += 1;
                self.expression(PREC_UNAIRE)
            }
            _ => self.postfixe(),
        }
    }

    fn postfixe(&mut self) -> Result<Expr, ErreurCalcul> {
        let mut e = self.primaire()?;
        while let Some(Tok::Bang) = self.courant() {
            self.pos += 1;
            e = Expr::Factorielle(Box::new(e));
        }
        Ok(e)
    }

    fn primaire(&mut self) -> Result<Expr, ErreurCalcul> {
        let tok = match self.courant() {
            Some(t) => t,
            None => return Err(ErreurCalcul::syntaxe("opérande manquant en fin d’expression")),
        };

        match tok {
            Tok::Num(v) => {
                self.pos += 1;
                Ok(Expr::Nombre(*v))
            }

            Tok::LPar => {
                self.pos += 1;
                let e = self.expression(1)?;
                self.attend(Tok::RPar, "parenthèse fermante attendue")?;
                Ok(e)
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(name)
                    .ok_or_else(|| ErreurCalcul::syntaxe(format!("fonction inconnue: {name}")))?;
                self.pos += 1;
                self.attend(Tok::LPar, &format!("parenthèse attendue après {name}"))?;
                let arg = self.expression(1)?;
                self.attend(Tok::RPar, "parenthèse fermante attendue")?;
                Ok(Expr::Appel(f, Box::new(arg)))
            }

            autre => Err(ErreurCalcul::syntaxe(format!(
                "opérande attendu, trouvé '{autre}'"
            ))),
        }
    }
}
