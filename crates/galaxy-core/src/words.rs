use crate::constants::*;
use crate::spiral::{place, SpiralDraw, SpiralParams};
use glam::Vec3;
use rand::Rng;

/// Phrases the floating labels are drawn from.
#[rustfmt::skip]
pub const VOCABULARY: &[&str] = &[
    "Te Amo", "Te Quiero", "Te Pienso", "Te Sueño", "Te Adoro", "Te Extraño", "Te Necesito",
    "Mi Vida", "Mi Amor", "Mi Corazón",
    "Eres Mi Todo", "Eres Mi Luz", "Eres Mi Sonrisa", "Eres Mi Inspiración",
    "Siempre Tú", "Juntos Para Siempre", "Eres mi Universo",
    "Mi Tesoro",
    "Mi Ternura", "Mi Todo", "Mi Hogar",
    "Te Llevo En Mi Alma", "Te Llevo En Mi Corazón", "Te Pienso A Cada Momento", "Te Sueño De Noche",
    "Contigo Siempre", "Contigo Aprendí", "Contigo Todo",
    "Eres Mi Destino", "Eres Mi Fuerza", "Eres Mi Refugio",
    "Amo Tu Mirada", "Amo Tu Sonrisa", "Amo Tus Besos", "Amo Tus Caricias", "Tu Voz", "Tu Calor",
    "Nuestro Secreto", "Nuestro Momento",
    "Quiero Verte", "Quiero Abrazarte", "Quiero Besarte", "Quiero Mimarte", "Quiero Soñarte",
    "Amor Eterno", "Amor Verdadero", "Amor Infinito", "Amor Sincero", "Amor Puro",
    "Mi Pareja", "Mi Amada", "Mi Reina", "Mi Princesa", "Mi Cielo",
    "Eres Especial", "Eres Única", "Eres Increíble", "Eres Hermosa", "Eres Perfecta",
    "Mi Razón De Ser", "Mi Compañía", "Mi Media Naranja", "Mi Confidente",
    "Mi Mejor Amiga", "Mi Cómplice", "Mi Aventurera",
    "Eres Mi Mundo", "Eres Mi Universo", "Eres Mi Cielo", "Eres Mi Estrella", "Eres Mi Sol",
    "Te Amo Más Cada Día", "Te Pienso Sin Parar", "Te Sueño Sin Fin",
    "Te Adoro Con Todo Mi Ser", "Te Extraño Cuando No Estás", "Te Necesito A Mi Lado",
    "Eres Mi Vida Entera", "Eres Mi Todo Y Más", "Eres Mi Luz En La Oscuridad",
    "Eres Mi Sonrisa En Los Días Grises", "Eres Mi Inspiración Diaria",
    "Juntos Somos Invencibles", "Para Siempre Contigo", "Mi Señorita", "Mis ojitos lindos",
    "Mi Shelly", "Mi linda Señorita",
];

#[derive(Clone, Debug, PartialEq)]
pub struct WordParams {
    pub count: usize,
    pub amplitude: f32,
    pub speed_min: f32,
    pub speed_span: f32,
}

impl Default for WordParams {
    fn default() -> Self {
        Self {
            count: WORD_COUNT,
            amplitude: WORD_AMPLITUDE,
            speed_min: WORD_SPEED_MIN,
            speed_span: WORD_SPEED_SPAN,
        }
    }
}

/// A floating label. Only `position.y` changes after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct WordMarker {
    /// Index into [`VOCABULARY`].
    pub phrase: usize,
    /// Index into [`WORD_COLORS`].
    pub color: usize,
    pub base_position: Vec3,
    pub speed: f32,
    pub position: Vec3,
}

impl WordMarker {
    pub fn text(&self) -> &'static str {
        VOCABULARY[self.phrase]
    }

    pub fn color_hex(&self) -> &'static str {
        WORD_COLORS[self.color]
    }

    pub fn update(&mut self, elapsed_ms: f64, amplitude: f32) {
        self.position.y = oscillate(self.base_position.y, self.speed, elapsed_ms, amplitude);
    }
}

/// Vertical position at `elapsed_ms`; depends on nothing but its arguments.
#[inline]
pub fn oscillate(base_y: f32, speed: f32, elapsed_ms: f64, amplitude: f32) -> f32 {
    let phase = elapsed_ms * 0.001 * speed as f64;
    base_y + phase.sin() as f32 * amplitude
}

/// Scatter `words.count` markers over the spiral, each on a random arm.
pub fn scatter_words<R: Rng + ?Sized>(
    spiral: &SpiralParams,
    words: &WordParams,
    rng: &mut R,
) -> Vec<WordMarker> {
    let arms = spiral.arms.max(1);
    (0..words.count)
        .map(|_| {
            let phrase = rng.gen_range(0..VOCABULARY.len());
            let color = rng.gen_range(0..WORD_COLORS.len());
            let radial = rng.gen::<f32>();
            let arm = rng.gen_range(0..arms);
            let jitter = rng.gen::<f32>();
            let height = rng.gen::<f32>();
            let speed = words.speed_min + rng.gen::<f32>() * words.speed_span;
            let point = place(
                spiral,
                arm,
                SpiralDraw {
                    radial,
                    jitter,
                    height,
                },
            );
            WordMarker {
                phrase,
                color,
                base_position: point.position,
                speed,
                position: point.position,
            }
        })
        .collect()
}
