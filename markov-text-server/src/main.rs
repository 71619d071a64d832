use std::path::PathBuf;
use std::sync::Mutex;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::info;
use serde::Deserialize;

use markov_text_core::io::read_text;
use markov_text_core::{Granularity, MarkovError, StartSeed, TextModel};

/// HTTP front-end over word and character Markov chains.
#[derive(Parser, Debug)]
#[command(name = "markov-text-server", version, about)]
struct Args {
	/// Text file the models are trained on at startup
	#[arg(short, long)]
	input: PathBuf,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Number of words in a word-level context
	#[arg(long, default_value_t = 3)]
	word_order: usize,

	/// Number of characters in a char-level context
	#[arg(long, default_value_t = 4)]
	char_order: usize,
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	level: Option<Granularity>,
	length: Option<usize>,
	seed: Option<String> // none (corpus opening), random or custom:<text>
}

/// Struct representing query parameters for the `/v1/probability` endpoint
#[derive(Deserialize)]
struct ProbabilityParams {
	level: Option<Granularity>,
	context: Option<String>,
	token: Option<String>
}

/// Both models, trained on the same texts.
struct SharedData {
	word: TextModel,
	char: TextModel
}

impl SharedData {
	fn new(word_order: usize, char_order: usize) -> Result<Self, MarkovError> {
		Ok(Self {
			word: TextModel::new(Granularity::Word, word_order)?,
			char: TextModel::new(Granularity::Char, char_order)?,
		})
	}

	fn model(&self, level: Granularity) -> &TextModel {
		match level {
			Granularity::Word => &self.word,
			Granularity::Char => &self.char,
		}
	}

	/// Accumulates `text` into both models, returns (words, chars) counts.
	fn train(&mut self, text: &str) -> (usize, usize) {
		(self.word.train_text(text), self.char.train_text(text))
	}
}

impl GenerateParams {
	/// Determines the starting seed strategy for sequence generation.
	fn start_seed(&self) -> Result<StartSeed, String> {
		match &self.seed {
			None => Ok(StartSeed::Corpus),
			Some(s) if s.to_lowercase() == "none" => Ok(StartSeed::Corpus),
			Some(s) if s.to_lowercase() == "random" => Ok(StartSeed::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = &s["custom:".len()..];
				if value.trim().is_empty() {
					Err("Custom seed cannot be empty".into())
				} else {
					Ok(StartSeed::Custom(value.to_owned()))
				}
			}
			Some(_) => Err("Seed must be 'none', 'random' or start with 'custom:'".into()),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sequence from the selected model based on query parameters.
/// Returns the seed followed by the generated tokens as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let level = query.level.unwrap_or_default();
	let length = query.length.unwrap_or(50);

	let start_seed = match query.start_seed() {
		Ok(s) => s,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model(level).generate(&start_seed, length, &mut rand::rng()) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e @ MarkovError::InvalidArgument(_)) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/probability`
///
/// Returns the probability of `token` following `context` as plain text.
#[get("/v1/probability")]
async fn get_probability(data: web::Data<Mutex<SharedData>>, query: web::Query<ProbabilityParams>) -> impl Responder {
	let level = query.level.unwrap_or_default();
	let (context, token) = match (&query.context, &query.token) {
		(Some(c), Some(t)) if !c.is_empty() && !t.is_empty() => (c, t),
		_ => return HttpResponse::BadRequest().body("Missing context or token"),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let probability = shared_data.model(level).probability(context, token);
	HttpResponse::Ok().body(format!("{probability:?}"))
}

/// HTTP PUT endpoint `/v1/train`
///
/// Adds the request body to both models; counts accumulate.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	if body.trim().is_empty() {
		return HttpResponse::BadRequest().body("Missing training text");
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let (words, chars) = shared_data.train(&body);
	info!("Trained on {words} more words and {chars} more characters");
	HttpResponse::Ok().body(format!("Trained on {words} word tokens and {chars} char tokens"))
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let lines: Vec<String> = [&shared_data.word, &shared_data.char]
		.iter()
		.map(|m| format!("{}: order={} contexts={}", m.granularity().name(), m.order(), m.chain().len()))
		.collect();
	HttpResponse::Ok().body(lines.join("\n"))
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_probability)
		.service(put_train)
		.service(get_stats);
}

/// Main entry point for the server.
///
/// Trains both models on the input file, wraps them in a `Mutex` so
/// requests are serialized, and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let mut shared_data = SharedData::new(args.word_order, args.char_order)
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	let text = read_text(&args.input)?;
	let (words, chars) = shared_data.train(&text);
	info!(
		"Loaded {} ({words} words, {chars} characters), listening on {}:{}",
		args.input.display(),
		args.host,
		args.port
	);

	let shared_model = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.configure(routes)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
