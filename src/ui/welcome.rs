use crossterm::style::{Color, Stylize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        title: "Captura de Operaciones Sostenibles",
        description: "cómo se identifican y capturan las operaciones sostenibles",
    },
    Suggestion {
        title: "Parametrización y Escalado de Productos",
        description: "información sobre cómo se administra la parametría",
    },
    Suggestion {
        title: "KPI Local de Sostenibilidad",
        description: "construcción del KPI de Sostenibilidad",
    },
    Suggestion {
        title: "Tablón Operativo",
        description: "cómo se genera, estructura y propósito del tablón",
    },
];

const TITLE: &str = "Bienvenido a SostenibiliChat";
const INTRO: &str = "Tu asistente virtual especializado en el proyecto corporativo de Sostenibilidad de BBVA.";
pub const FOOTER: &str = "Powered by BBVA | Compromiso con el medio ambiente";

/// 1-based lookup, matching the numbers shown in the panel.
pub fn suggestion(number: usize) -> Option<&'static Suggestion> {
    number.checked_sub(1).and_then(|i| SUGGESTIONS.get(i))
}

pub fn render_welcome(styled: bool) -> String {
    let mut lines = Vec::new();

    if styled {
        lines.push(TITLE.with(Color::Cyan).bold().to_string());
    } else {
        lines.push(TITLE.to_string());
    }
    lines.push(INTRO.to_string());
    lines.push(String::new());

    for (i, s) in SUGGESTIONS.iter().enumerate() {
        let number = format!("[{}]", i + 1);
        if styled {
            lines.push(format!(
                "  {} {}",
                number.with(Color::Green),
                s.title.bold()
            ));
            lines.push(format!("      {}", s.description.with(Color::DarkGrey)));
        } else {
            lines.push(format!("  {number} {}", s.title));
            lines.push(format!("      {}", s.description));
        }
    }

    lines.push(String::new());
    lines.push("Usa /sugerir <n> para preguntar por una sugerencia.".to_string());
    if styled {
        lines.push(FOOTER.with(Color::DarkGrey).to_string());
    } else {
        lines.push(FOOTER.to_string());
    }
    lines.join("\n")
}
