//! 海事基础术语表
//!
//! 每个条目给出西班牙语、英语、法语、德语和普通话的对应说法。

use once_cell::sync::Lazy;

use crate::models::chatbot::GlossaryEntry;

// (西语, 英语, 法语, 德语, 普通话, 释义)
const TERMS: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("puerto", "port", "port", "Hafen", "港口", "Lugar de la costa donde los buques atracan para cargar y descargar."),
    ("ancla", "anchor", "ancre", "Anker", "锚", "Pieza de hierro que se lanza al fondo para sujetar el buque."),
    ("cubierta", "deck", "pont", "Deck", "甲板", "Superficie horizontal que cierra el casco por la parte superior."),
    ("motor", "engine", "moteur", "Maschine", "主机", "Máquina que produce la propulsión del buque."),
    ("navegación", "navigation", "navigation", "Navigation", "航行", "Arte de conducir un buque de un punto a otro con seguridad."),
    ("proa", "bow", "proue", "Bug", "船首", "Parte delantera del buque."),
    ("popa", "stern", "poupe", "Heck", "船尾", "Parte trasera del buque."),
    ("babor", "port side", "bâbord", "Backbord", "左舷", "Costado izquierdo del buque mirando hacia proa."),
    ("estribor", "starboard", "tribord", "Steuerbord", "右舷", "Costado derecho del buque mirando hacia proa."),
    ("timón", "rudder", "gouvernail", "Ruder", "舵", "Pieza articulada en la popa que sirve para gobernar el buque."),
    ("casco", "hull", "coque", "Rumpf", "船体", "Cuerpo del buque sin contar arboladura ni superestructura."),
    ("muelle", "wharf", "quai", "Kai", "码头", "Obra portuaria donde atracan los buques."),
    ("buque", "vessel", "navire", "Schiff", "船舶", "Embarcación de gran porte destinada a la navegación."),
    ("capitán", "captain", "capitaine", "Kapitän", "船长", "Oficial al mando del buque y responsable de la expedición."),
    ("tripulación", "crew", "équipage", "Besatzung", "船员", "Conjunto de personas que trabajan a bordo."),
    ("carga", "cargo", "cargaison", "Ladung", "货物", "Mercancía transportada por el buque."),
    ("amarre", "mooring", "amarrage", "Festmachen", "系泊", "Acción de asegurar el buque al muelle o a una boya con cabos."),
    ("faro", "lighthouse", "phare", "Leuchtturm", "灯塔", "Torre con luz potente que sirve de guía a los navegantes."),
    ("brújula", "compass", "compas", "Kompass", "罗经", "Instrumento que indica el norte magnético."),
    ("nudo", "knot", "nœud", "Knoten", "节", "Unidad de velocidad equivalente a una milla náutica por hora."),
    ("marea", "tide", "marée", "Gezeiten", "潮汐", "Ascenso y descenso periódico del nivel del mar."),
    ("chaleco salvavidas", "life jacket", "gilet de sauvetage", "Rettungsweste", "救生衣", "Prenda que mantiene a flote a una persona en el agua."),
    ("bote salvavidas", "lifeboat", "canot de sauvetage", "Rettungsboot", "救生艇", "Embarcación destinada a evacuar a las personas en caso de abandono del buque."),
    ("puente de mando", "bridge", "passerelle", "Brücke", "驾驶台", "Lugar desde donde se gobierna el buque."),
    ("calado", "draft", "tirant d'eau", "Tiefgang", "吃水", "Distancia vertical entre la línea de flotación y la quilla."),
    ("eslora", "length overall", "longueur hors tout", "Länge über alles", "总长", "Longitud del buque de proa a popa."),
    ("manga", "beam", "largeur", "Breite", "船宽", "Anchura máxima del buque."),
];

pub static GLOSSARY: Lazy<Vec<GlossaryEntry>> = Lazy::new(|| {
    TERMS
        .iter()
        .map(
            |&(spanish, english, french, german, mandarin, definition)| GlossaryEntry {
                spanish: spanish.to_string(),
                english: english.to_string(),
                french: french.to_string(),
                german: german.to_string(),
                mandarin: mandarin.to_string(),
                definition: definition.to_string(),
            },
        )
        .collect()
});

impl GlossaryEntry {
    /// 所有语言的写法
    pub fn terms(&self) -> [&str; 5] {
        [
            &self.spanish,
            &self.english,
            &self.french,
            &self.german,
            &self.mandarin,
        ]
    }
}

/// 基础词汇表，Markdown 表格
pub fn vocabulary_table() -> String {
    let mut table = String::from(
        "| Español | English | Français | Deutsch | 中文 |\n|---|---|---|---|---|\n",
    );
    for entry in GLOSSARY.iter() {
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            entry.spanish, entry.english, entry.french, entry.german, entry.mandarin
        ));
    }
    table
}
