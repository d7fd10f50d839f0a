//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - référence : évaluation récursive directe de l’arbre généré
//! - le moteur, lui, ne doit jamais rester coincé dans un état incohérent

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::LIMITE_RESULTAT;
use super::eval_expression;
use super::fonctions::Fonction;
use super::format::{format_nombre, MAX_CHIFFRES};
use super::historique::MAX_HISTORIQUE;
use super::jetons::Operateur;
use super::moteur::{Commande, Constante, EnAttente, Moteur};
use super::trig::ModeAngle;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arbres d’expression ------------------------ */

enum Arbre {
    Feuille(f64),
    Neg(Box<Arbre>),
    Noeud(Operateur, Box<Arbre>, Box<Arbre>),
}

impl Arbre {
    /// Rendu entièrement parenthésé : l’ordre d’évaluation est celui de l’arbre.
    fn texte(&self) -> String {
        match self {
            Arbre::Feuille(v) => format!("{v}"),
            Arbre::Neg(a) => format!("(-{})", a.texte()),
            Arbre::Noeud(op, g, d) => format!("({}{}{})", g.texte(), op.jeton(), d.texte()),
        }
    }

    /// Évaluation directe. None : un diviseur nul a été rencontré.
    fn reference(&self) -> Option<f64> {
        match self {
            Arbre::Feuille(v) => Some(*v),
            Arbre::Neg(a) => a.reference().map(|v| -v),
            Arbre::Noeud(op, g, d) => {
                let a = g.reference();
                let b = d.reference();
                let (a, b) = (a?, b?);
                match op {
                    Operateur::Plus => Some(a + b),
                    Operateur::Moins => Some(a - b),
                    Operateur::Fois => Some(a * b),
                    Operateur::Divise => (b != 0.0).then(|| a / b),
                    Operateur::Puissance => Some(a.powf(b)),
                }
            }
        }
    }
}

fn gen_feuille(rng: &mut Rng) -> f64 {
    // entiers 0..20 (zéros fréquents), parfois des quarts
    let n = f64::from(rng.pick(21));
    if rng.pick(4) == 0 {
        n + f64::from(rng.pick(4)) * 0.25
    } else {
        n
    }
}

fn gen_arbre(rng: &mut Rng, depth: usize) -> Arbre {
    if depth == 0 {
        return Arbre::Feuille(gen_feuille(rng));
    }

    let sous = |rng: &mut Rng| Box::new(gen_arbre(rng, depth - 1));
    match rng.pick(8) {
        0 => Arbre::Feuille(gen_feuille(rng)),
        1 => Arbre::Neg(sous(rng)),
        2 => Arbre::Noeud(Operateur::Plus, sous(rng), sous(rng)),
        3 => Arbre::Noeud(Operateur::Moins, sous(rng), sous(rng)),
        4 => Arbre::Noeud(Operateur::Fois, sous(rng), sous(rng)),
        5 => Arbre::Noeud(Operateur::Divise, sous(rng), sous(rng)),
        6 => {
            // exposant entier positif borné : pas de racine de négatif
            let e = f64::from(rng.pick(4));
            Arbre::Noeud(Operateur::Puissance, sous(rng), Box::new(Arbre::Feuille(e)))
        }
        _ => Arbre::Feuille(gen_feuille(rng)),
    }
}

/* ------------------------ Chaîne plate (précédence) ------------------------ */

/// "a op b op c ..." sans parenthèses, opérateurs + - * /.
fn gen_chaine(rng: &mut Rng, n: usize) -> (Vec<f64>, Vec<Operateur>) {
    let nombres: Vec<f64> = (0..=n).map(|_| gen_feuille(rng)).collect();
    let ops = (0..n)
        .map(|_| match rng.pick(4) {
            0 => Operateur::Plus,
            1 => Operateur::Moins,
            2 => Operateur::Fois,
            _ => Operateur::Divise,
        })
        .collect();
    (nombres, ops)
}

/// Référence indépendante du shunting-yard : somme de produits, de gauche à droite.
fn reference_chaine(nombres: &[f64], ops: &[Operateur]) -> Option<f64> {
    let mut somme = 0.0;
    let mut signe = 1.0;
    let mut produit = *nombres.first()?;

    for (op, &b) in ops.iter().zip(&nombres[1..]) {
        match op {
            Operateur::Plus | Operateur::Moins => {
                somme += signe * produit;
                signe = if *op == Operateur::Plus { 1.0 } else { -1.0 };
                produit = b;
            }
            Operateur::Fois => produit *= b,
            Operateur::Divise => {
                if b == 0.0 {
                    return None;
                }
                produit /= b;
            }
            Operateur::Puissance => unreachable!("pas de puissance dans les chaînes"),
        }
    }
    Some(somme + signe * produit)
}

fn texte_chaine(nombres: &[f64], ops: &[Operateur]) -> String {
    let mut s = format!("{}", nombres[0]);
    for (op, b) in ops.iter().zip(&nombres[1..]) {
        s.push_str(op.jeton());
        s.push_str(&format!("{b}"));
    }
    s
}

/* ------------------------ Confrontation ------------------------ */

fn confronter(expr: &str, attendu: Option<f64>) -> Result<(), ErreurCalc> {
    match (eval_expression(expr), attendu) {
        (Ok(v), Some(r)) => {
            assert_eq!(v, r, "expr={expr:?}");
            Ok(())
        }
        (Err(ErreurCalc::DivisionParZero), None) => Err(ErreurCalc::DivisionParZero),
        (Err(ErreurCalc::Depassement), Some(r)) if !r.is_finite() || r.abs() > LIMITE_RESULTAT => {
            Err(ErreurCalc::Depassement)
        }
        (obtenu, attendu) => panic!("expr={expr:?} obtenu={obtenu:?} attendu={attendu:?}"),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_arbres_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let arbre = gen_arbre(&mut rng, 4);
        match confronter(&arbre.texte(), arbre.reference()) {
            Ok(()) => seen_ok += 1,
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_chaines_sans_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let n = 1 + rng.pick(6) as usize;
        let (nombres, ops) = gen_chaine(&mut rng, n);
        let _ = confronter(&texte_chaine(&nombres, &ops), reference_chaine(&nombres, &ops));
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800 * 0.5 = 400 (somme exacte en binaire)
    assert_eq!(v, 400.0);
}

/* ------------------------ Moteur : touches au hasard ------------------------ */

const TOUCHES: &[Commande] = &[
    Commande::Chiffre('0'),
    Commande::Chiffre('1'),
    Commande::Chiffre('7'),
    Commande::Chiffre('9'),
    Commande::Chiffre('.'),
    Commande::Operateur(Operateur::Plus),
    Commande::Operateur(Operateur::Moins),
    Commande::Operateur(Operateur::Fois),
    Commande::Operateur(Operateur::Divise),
    Commande::Operateur(Operateur::Puissance),
    Commande::Evaluer,
    Commande::Evaluer,
    Commande::Fonction(Fonction::Sin),
    Commande::Fonction(Fonction::Tan),
    Commande::Fonction(Fonction::Asin),
    Commande::Fonction(Fonction::Cot),
    Commande::Fonction(Fonction::Sqrt),
    Commande::Fonction(Fonction::Ln),
    Commande::Fonction(Fonction::Carre),
    Commande::RacinePersonnalisee,
    Commande::Constante(Constante::Pi),
    Commande::MemoireEffacer,
    Commande::MemoireRappel,
    Commande::MemoireAjouter,
    Commande::MemoireSoustraire,
    Commande::ChangerSigne,
    Commande::Pourcentage,
    Commande::Retour,
    Commande::Effacer,
    Commande::ModeAngle(ModeAngle::Radians),
    Commande::ModeAngle(ModeAngle::Degres),
];

#[test]
fn fuzz_safe_moteur_touches_au_hasard() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..40 {
        let mut m = Moteur::default();

        for _ in 0..250 {
            budget(t0, max);

            let cmd = TOUCHES[rng.pick(TOUCHES.len() as u32) as usize];

            // "=" sur une expression complète : même verdict que l’évaluateur libre
            let texte = (cmd == Commande::Evaluer
                && !m.est_erreur()
                && m.attente() == EnAttente::Aucune
                && !m.terme().is_empty())
            .then(|| format!("{}{}", m.expression_interne(), m.terme()));

            let r = m.executer(cmd);

            if let Some(texte) = texte {
                match eval_expression(&texte) {
                    Ok(v) => {
                        assert!(!r.est_erreur, "expr={texte:?} obtenu={:?}", r.affichage);
                        assert_eq!(r.affichage, format_nombre(v), "expr={texte:?}");
                    }
                    Err(e) => {
                        assert!(r.est_erreur, "expr={texte:?} attendu={e}");
                        assert_eq!(r.affichage, e.to_string(), "expr={texte:?}");
                    }
                }
            }

            assert_eq!(r.est_erreur, m.est_erreur());
            assert_eq!(r.en_attente, m.attente() != EnAttente::Aucune);
            assert!(m.historique().len() <= MAX_HISTORIQUE);

            // mémoire jamais alimentée => zéro
            if !m.memoire().active() {
                assert_eq!(m.memoire().valeur(), 0.0);
            }

            if r.en_attente {
                assert!(!r.expression.is_empty(), "invite absente après {cmd:?}");
            }

            if r.est_erreur {
                assert_eq!(m.attente(), EnAttente::Aucune);

                // une erreur n’est jamais bloquante
                let mut suite = m.clone();
                let r2 = suite.executer(Commande::Chiffre('7'));
                assert!(!r2.est_erreur);
                assert_eq!(r2.affichage, "7");
                assert_eq!(r2.expression, "");
            } else {
                // ± peut ajouter un signe à un terme plein
                assert!(
                    r.affichage.chars().count() <= MAX_CHIFFRES + 1,
                    "affichage trop long: {:?} après {cmd:?}",
                    r.affichage
                );
            }

            if rng.coin() && rng.coin() && rng.coin() {
                // C ramène toujours à l’état neutre
                let mut c = m.clone();
                let r3 = c.executer(Commande::Effacer);
                assert_eq!(r3.affichage, "0");
                assert_eq!(r3.expression, "");
                assert!(!r3.est_erreur);
            }
        }
    }
}
