pub mod routes;
pub mod run;
