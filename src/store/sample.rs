//! Built-in sample data.
//!
//! Used when neither the network nor a prior snapshot can supply a document,
//! so the rest of the pipeline never receives an absent value. Content mirrors
//! the Voorjaarsnota 2024 source page.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{Document, Heading, Table};

/// Fixed timestamp for the sample data: publication month of the nota.
fn sample_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// The fallback document with hardcoded municipal budget content.
pub fn sample_document() -> Document {
    let headings = [
        (1, "Voorjaarsnota 2024"),
        (2, "Voortgang"),
        (2, "Financiële Ontwikkelingen"),
        (2, "Beleidsprioriteiten"),
        (3, "Wonen"),
        (3, "Mobiliteit"),
        (3, "Duurzaamheid"),
        (3, "Economie"),
        (3, "Sociaal Domein"),
    ];

    let paragraphs = [
        "De Voorjaarsnota 2024 geeft inzicht in de voortgang van de uitvoering van het \
         collegeprogramma en de financiële ontwikkelingen.",
        "Rotterdam investeert in 2024 fors in de stad met een focus op wonen, mobiliteit \
         en duurzaamheid.",
        "De gemeente Rotterdam zet in op het bouwen van 3.000 nieuwe woningen in 2024.",
        "Voor het verbeteren van de mobiliteit is €45 miljoen beschikbaar gesteld.",
        "De duurzaamheidstransitie wordt versneld met een investering van €30 miljoen.",
        "De economische ontwikkeling wordt gestimuleerd met €20 miljoen voor innovatie en \
         ondernemerschap.",
        "In het sociaal domein wordt €60 miljoen geïnvesteerd om armoede tegen te gaan en \
         kansengelijkheid te bevorderen.",
    ];

    let list_items = [
        "Bouw van 3.000 nieuwe woningen",
        "Verbetering van OV-verbindingen",
        "Verduurzaming van 5.000 woningen",
        "Ondersteuning van 500 startups en scale-ups",
        "Uitbreiding van armoedebestrijdingsprogramma's",
        "Vergroening van 10 wijken",
        "Aanleg van 15 km nieuwe fietspaden",
    ];

    let budget_table = Table::from_strings(
        [
            "Programma",
            "Budget 2024 (miljoen €)",
            "Verschil t.o.v. 2023 (miljoen €)",
        ],
        [
            vec!["Wonen", "150", "+25"],
            vec!["Mobiliteit", "120", "+45"],
            vec!["Duurzaamheid", "80", "+30"],
            vec!["Economie", "70", "+20"],
            vec!["Sociaal Domein", "200", "+60"],
            vec!["Veiligheid", "90", "+15"],
            vec!["Cultuur", "40", "+5"],
        ],
    );

    let housing_table = Table::from_strings(
        ["Wijk", "Aantal nieuwe woningen", "Investering (miljoen €)"],
        [
            vec!["Centrum", "800", "40"],
            vec!["Noord", "600", "30"],
            vec!["Zuid", "700", "35"],
            vec!["West", "500", "25"],
            vec!["Oost", "400", "20"],
        ],
    );

    let numeric_mentions = [
        "3.000 woningen",
        "€45 miljoen",
        "€30 miljoen",
        "€20 miljoen",
        "€60 miljoen",
        "5.000 woningen",
        "500 startups",
        "10 wijken",
        "15 km",
        "150 miljoen €",
        "120 miljoen €",
        "80 miljoen €",
        "70 miljoen €",
        "200 miljoen €",
        "90 miljoen €",
        "40 miljoen €",
        "800 woningen",
        "600 woningen",
        "700 woningen",
        "500 woningen",
        "400 woningen",
    ];

    Document {
        title: "Voorjaarsnota 2024 Dashboard".to_string(),
        headings: headings
            .iter()
            .map(|&(level, text)| Heading::new(level, text))
            .collect(),
        paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        list_items: list_items.iter().map(|li| li.to_string()).collect(),
        tables: vec![budget_table, housing_table],
        numeric_mentions: numeric_mentions.iter().map(|m| m.to_string()).collect(),
        images: Vec::new(),
        full_text: "Voorjaarsnota 2024 Rotterdam - Voortgang en Financiële Ontwikkelingen"
            .to_string(),
        fetched_at: sample_timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_document_content() {
        let doc = sample_document();
        assert_eq!(doc.title, "Voorjaarsnota 2024 Dashboard");
        assert_eq!(doc.headings.len(), 9);
        assert_eq!(doc.paragraphs.len(), 7);
        assert_eq!(doc.list_items.len(), 7);
        assert_eq!(doc.tables.len(), 2);
        assert_eq!(doc.numeric_mentions.len(), 21);
        assert!(doc.images.is_empty());
    }

    #[test]
    fn test_sample_budget_table() {
        let doc = sample_document();
        let table = &doc.tables[0];
        assert_eq!(table.headers[1], "Budget 2024 (miljoen €)");
        assert_eq!(table.rows[0], vec!["Wonen", "150", "+25"]);
    }

    #[test]
    fn test_sample_is_deterministic() {
        assert_eq!(sample_document(), sample_document());
    }
}
