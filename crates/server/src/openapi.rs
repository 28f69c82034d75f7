use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CourseDoc { pub id: i64, pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct CourseInputDoc { pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ping,
        crate::routes::courses::list_courses,
        crate::routes::courses::get_course,
        crate::routes::courses::create_course,
        crate::routes::courses::update_course,
        crate::routes::courses::delete_course,
        crate::routes::objects::list_s3_objects,
        crate::routes::objects::read_s3_object,
        crate::routes::objects::s3_object_exists,
        crate::routes::objects::list_blobs,
        crate::routes::objects::read_blob,
        crate::routes::objects::blob_exists,
    ),
    components(
        schemas(
            HealthResponse,
            CourseDoc,
            CourseInputDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "courses"),
        (name = "objects")
    )
)]
pub struct ApiDoc;
