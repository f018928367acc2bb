use server::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(spec) => println!("{spec}"),
        Err(err) => {
            eprintln!("failed to serialize OpenAPI document: {err}");
            std::process::exit(1);
        }
    }
}
