use actix_web::{get, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::manager_statistics::{
    date_range_extremes, day_of_week_average, global_average, locality_average,
    threshold_filter, weekly_summary, StatsError, ThresholdCondition, ThresholdMatch,
};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct AverageBody {
    average: f64,
}

/// Maps a statistics error onto its status code with a json error body
fn error_response(err: StatsError) -> HttpResponse {
    match err {
        StatsError::NotFound(error) | StatsError::NoData(error) => {
            HttpResponse::NotFound().json(ErrorBody { error })
        }
        StatsError::InvalidInput(error) => {
            HttpResponse::BadRequest().json(ErrorBody { error })
        }
    }
}

/// Returns the full dataset snapshot
#[get("/api/data")]
pub async fn get_data(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&data.dataset)
}

/// Returns the locality names in dataset order
#[get("/api/localities")]
pub async fn get_localities(data: web::Data<AppState>) -> impl Responder {
    #[derive(Serialize)]
    struct Body {
        localities: Vec<String>,
    }

    HttpResponse::Ok().json(Body { localities: data.dataset.locality_names() })
}

#[get("/api/global-average")]
pub async fn get_global_average(data: web::Data<AppState>) -> impl Responder {
    match global_average(&data.dataset) {
        Ok(average) => HttpResponse::Ok().json(AverageBody { average }),
        Err(e) => error_response(e),
    }
}

/// Returns the average for one locality, the name arrives url decoded
/// from the routing layer
#[get("/api/locality-average/{name}")]
pub async fn get_locality_average(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match locality_average(&data.dataset, &name) {
        Ok(average) => HttpResponse::Ok().json(AverageBody { average }),
        Err(e) => error_response(e),
    }
}

/// Returns the average across localities for one day index, 0 = Monday
#[get("/api/day-average/{day}")]
pub async fn get_day_average(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let raw = path.into_inner();

    let day = match raw.parse::<i64>() {
        Ok(day) => day,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(ErrorBody { error: format!("invalid day index '{}'", raw) });
        }
    };

    match day_of_week_average(&data.dataset, day) {
        Ok(average) => HttpResponse::Ok().json(AverageBody { average }),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct FilterParams {
    threshold: String,
    condition: String,
}

#[get("/api/threshold-filter")]
pub async fn get_threshold_filter(data: web::Data<AppState>, params: web::Query<FilterParams>) -> impl Responder {
    let threshold = match params.threshold.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            return HttpResponse::BadRequest()
                .json(ErrorBody { error: format!("invalid threshold '{}'", params.threshold) });
        }
    };

    let condition = match params.condition.parse::<ThresholdCondition>() {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    match threshold_filter(&data.dataset, threshold, condition) {
        Ok(matches) => {
            #[derive(Serialize)]
            struct Body {
                matches: Vec<ThresholdMatch>,
            }

            HttpResponse::Ok().json(Body { matches })
        }
        Err(e) => error_response(e),
    }
}

/// Returns one locality's week with the per day mean of max and min
#[get("/api/weekly-summary/{name}")]
pub async fn get_weekly_summary(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match weekly_summary(&data.dataset, &name) {
        Ok(summary) => {
            #[derive(Serialize)]
            struct Body {
                summary: Vec<crate::manager_statistics::DaySummary>,
            }

            HttpResponse::Ok().json(Body { summary })
        }
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct RangeParams {
    start: String,
    end: String,
}

/// Returns the highest max and lowest min over the date range, endpoints
/// accepted in either order
#[get("/api/range-extremes")]
pub async fn get_range_extremes(data: web::Data<AppState>, params: web::Query<RangeParams>) -> impl Responder {
    let start = match params.start.parse::<NaiveDate>() {
        Ok(d) => d,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(ErrorBody { error: format!("invalid start date '{}'", params.start) });
        }
    };
    let end = match params.end.parse::<NaiveDate>() {
        Ok(d) => d,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(ErrorBody { error: format!("invalid end date '{}'", params.end) });
        }
    };

    HttpResponse::Ok().json(date_range_extremes(&data.dataset, start, end))
}
