mod bypass;
mod support;
