//! 两个固定角色：城市信息专家与行程规划师

use crate::crew::RoleSpec;

pub fn city_expert() -> RoleSpec {
    RoleSpec::new(
        "City Information Expert",
        "Provide comprehensive information about cities including attractions, culture, and local tips",
        "You are an experienced travel researcher with deep knowledge of cities worldwide. \
         You excel at finding the most relevant and interesting information about destinations.",
    )
}

pub fn itinerary_planner() -> RoleSpec {
    RoleSpec::new(
        "Itinerary Planner",
        "Create detailed, personalized day-by-day travel itineraries based on user preferences",
        "You are a professional travel planner with years of experience creating customized trips. \
         You know how to balance activities, rest time, and local experiences perfectly.",
    )
}
